//! Dashboard HTTP server.
//!
//! Serves the admin tables as JSON views and CSV downloads. The role gate
//! runs before any table access: the request's role cookie is read once at
//! entry into an [`AuthContext`], and the static routing table decides allow
//! or redirect. View state lives per request — each call builds a fresh
//! [`TableView`] over a snapshot of the table's rows.

use actix_web::{http::header, middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;

use crate::access::{route_decision, AdminRole, AuthContext, RouteDecision};
use crate::column::Column;
use crate::domain::{
    format_currency_idr, render_timestamp_wib, AdminAccount, Disbursement, DisbursementStatus,
    Order, OrderStatus, PaymentMethod, Promotion, PromotionType, Report, ReportReason,
    ReportStatus, ServiceType, Transaction, TransactionStatus, University, User, UserRole,
};
use crate::export::to_csv;
use crate::messages::{ColumnInfo, ErrorResponse, ViewQuery, ViewResponse};
use crate::row::Row;
use crate::view::TableView;

/// Cookie carrying the admin role, set by the login flow.
pub const ROLE_COOKIE: &str = "campusrun_role";

/// One servable dashboard table: a row snapshot plus its column layout.
pub struct DashboardTable {
    rows: Vec<Row>,
    columns: fn() -> Vec<Column>,
}

impl DashboardTable {
    fn new(rows: Vec<Row>, columns: fn() -> Vec<Column>) -> Self {
        DashboardTable { rows, columns }
    }

    /// Fresh view over a snapshot of this table's rows.
    pub fn view(&self) -> TableView {
        TableView::new(self.rows.clone(), (self.columns)())
    }
}

/// Shared, read-only state: every dashboard table keyed by route name.
pub struct AppState {
    pub tables: HashMap<String, DashboardTable>,
}

impl AppState {
    /// Seed the eight dashboard tables with sample marketplace data.
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        tables.insert(
            "users".to_string(),
            DashboardTable::new(
                sample_users().iter().map(User::to_row).collect(),
                user_columns,
            ),
        );
        tables.insert(
            "orders".to_string(),
            DashboardTable::new(
                sample_orders().iter().map(Order::to_row).collect(),
                order_columns,
            ),
        );
        tables.insert(
            "transactions".to_string(),
            DashboardTable::new(
                sample_transactions().iter().map(Transaction::to_row).collect(),
                transaction_columns,
            ),
        );
        tables.insert(
            "disbursements".to_string(),
            DashboardTable::new(
                sample_disbursements().iter().map(Disbursement::to_row).collect(),
                disbursement_columns,
            ),
        );
        tables.insert(
            "reports".to_string(),
            DashboardTable::new(
                sample_reports().iter().map(Report::to_row).collect(),
                report_columns,
            ),
        );
        tables.insert(
            "universities".to_string(),
            DashboardTable::new(
                sample_universities().iter().map(University::to_row).collect(),
                university_columns,
            ),
        );
        tables.insert(
            "promotions".to_string(),
            DashboardTable::new(
                sample_promotions().iter().map(Promotion::to_row).collect(),
                promotion_columns,
            ),
        );
        tables.insert(
            "admins".to_string(),
            DashboardTable::new(
                sample_admins().iter().map(AdminAccount::to_row).collect(),
                admin_columns,
            ),
        );
        AppState { tables }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "CampusRun admin dashboard server is running"
    }))
}

fn auth_from_request(req: &HttpRequest) -> AuthContext {
    let role = req.cookie(ROLE_COOKIE).map(|c| c.value().to_string());
    AuthContext::from_role_str(role.as_deref())
}

/// Gate the request path; `Some` is the redirect response to return early.
fn apply_gate(req: &HttpRequest) -> Option<HttpResponse> {
    let ctx = auth_from_request(req);
    match route_decision(&ctx, req.path()) {
        RouteDecision::Allow => None,
        RouteDecision::Redirect(location) => {
            log::info!("redirecting {} -> {}", req.path(), location);
            Some(
                HttpResponse::Found()
                    .insert_header((header::LOCATION, location))
                    .finish(),
            )
        }
    }
}

fn apply_query(view: &mut TableView, query: &ViewQuery) {
    if let Some(search) = &query.search {
        view.set_search_query(search.clone());
    }
    if let Some(key) = &query.sort {
        view.set_sort(key);
        // The engine's sort mutator toggles; a second call lands on descending.
        if matches!(query.dir.as_deref(), Some("desc")) {
            view.set_sort(key);
        }
    }
    if let Some(page) = query.page {
        view.set_page(page);
    }
}

/// Table view endpoint: one computed page as JSON.
async fn table_view(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<ViewQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    if let Some(redirect) = apply_gate(&req) {
        return redirect;
    }
    let name = path.into_inner();
    let Some(table) = state.tables.get(&name) else {
        return HttpResponse::NotFound().json(ErrorResponse {
            message: format!("unknown table '{}'", name),
        });
    };

    let mut view = table.view();
    apply_query(&mut view, &query);

    let output = view.compute_view();
    let response = ViewResponse {
        columns: view.columns().iter().map(ColumnInfo::from).collect(),
        rows: output.rows.iter().map(|&r| r.clone()).collect(),
        total_filtered: output.total_filtered,
        total_pages: output.total_pages,
        current_page: output.current_page,
        table: name,
    };
    HttpResponse::Ok().json(response)
}

/// CSV download endpoint: the filtered (not paginated) row set.
async fn table_export(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<ViewQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    if let Some(redirect) = apply_gate(&req) {
        return redirect;
    }
    let name = path.into_inner();
    let Some(table) = state.tables.get(&name) else {
        return HttpResponse::NotFound().json(ErrorResponse {
            message: format!("unknown table '{}'", name),
        });
    };

    let mut view = table.view();
    apply_query(&mut view, &query);

    let csv = to_csv(view.filtered_rows());
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.csv\"", name),
        ))
        .body(csv)
}

/// Start the dashboard HTTP server.
pub async fn run_server(host: &str, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new());

    log::info!("dashboard API listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            // Enable logger
            .wrap(middleware::Logger::default())
            // CORS for development
            .wrap(
                actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(health_check))
            .route("/dashboard/{table}", web::get().to(table_view))
            .route("/dashboard/{table}/export", web::get().to(table_export))
    })
    .bind((host, port))?
    .run()
    .await
}

fn cell_text(row: &Row, key: &str) -> String {
    row.get(key).map(|v| v.to_string()).unwrap_or_default()
}

fn currency_render(key: &'static str) -> impl Fn(&Row) -> String + Send + Sync + 'static {
    move |row: &Row| {
        format_currency_idr(row.get(key).and_then(|v| v.as_number()).unwrap_or(0.0))
    }
}

fn timestamp_render(key: &'static str) -> impl Fn(&Row) -> String + Send + Sync + 'static {
    move |row: &Row| render_timestamp_wib(&cell_text(row, key))
}

fn user_columns() -> Vec<Column> {
    vec![
        Column::sortable("name", "Nama"),
        Column::sortable("email", "Email"),
        Column::new("role", "Peran"),
        Column::sortable("is_verified", "Terverifikasi"),
        Column::sortable("is_active", "Aktif"),
        Column::sortable("total_orders", "Order"),
        Column::sortable("balance", "Saldo").with_render(currency_render("balance")),
        Column::sortable("created_at", "Terdaftar").with_render(timestamp_render("created_at")),
    ]
}

fn order_columns() -> Vec<Column> {
    vec![
        Column::sortable("order_code", "Kode"),
        Column::new("title", "Judul"),
        Column::new("service_type", "Layanan"),
        Column::sortable("status", "Status"),
        Column::sortable("total_amount", "Total").with_render(currency_render("total_amount")),
        Column::sortable("created_at", "Dibuat").with_render(timestamp_render("created_at")),
    ]
}

fn transaction_columns() -> Vec<Column> {
    vec![
        Column::sortable("transaction_code", "Kode"),
        Column::new("payment_method", "Metode"),
        Column::new("payment_gateway", "Gateway"),
        Column::sortable("amount", "Jumlah").with_render(currency_render("amount")),
        Column::sortable("status", "Status"),
        Column::sortable("paid_at", "Dibayar").with_render(timestamp_render("paid_at")),
    ]
}

fn disbursement_columns() -> Vec<Column> {
    vec![
        Column::sortable("account_name", "Nama Rekening"),
        Column::new("bank_name", "Bank"),
        Column::new("account_number", "No. Rekening"),
        Column::sortable("amount", "Jumlah").with_render(currency_render("amount")),
        Column::sortable("status", "Status"),
        Column::sortable("created_at", "Diajukan").with_render(timestamp_render("created_at")),
    ]
}

fn report_columns() -> Vec<Column> {
    vec![
        Column::new("reason", "Alasan"),
        Column::new("description", "Deskripsi"),
        Column::sortable("status", "Status"),
        Column::sortable("created_at", "Dilaporkan").with_render(timestamp_render("created_at")),
    ]
}

fn university_columns() -> Vec<Column> {
    vec![
        Column::sortable("name", "Nama"),
        Column::sortable("city", "Kota"),
        Column::new("province", "Provinsi"),
        Column::sortable("total_users", "Pengguna"),
        Column::sortable("is_active", "Aktif"),
    ]
}

fn promotion_columns() -> Vec<Column> {
    vec![
        Column::sortable("code", "Kode"),
        Column::new("title", "Judul"),
        Column::new("type", "Tipe"),
        Column::sortable("value", "Nilai"),
        Column::sortable("used_count", "Dipakai"),
        Column::sortable("is_active", "Aktif"),
        Column::sortable("expired_at", "Kedaluwarsa").with_render(timestamp_render("expired_at")),
    ]
}

fn admin_columns() -> Vec<Column> {
    vec![
        Column::sortable("name", "Nama"),
        Column::sortable("email", "Email"),
        Column::sortable("role", "Peran"),
        Column::sortable("is_active", "Aktif"),
        Column::sortable("last_login_at", "Login Terakhir")
            .with_render(timestamp_render("last_login_at")),
    ]
}

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid sample timestamp")
}

fn sample_users() -> Vec<User> {
    vec![
        User {
            id: "usr-1".to_string(),
            full_name: "Ana Maharani".to_string(),
            email: "ana@ui.ac.id".to_string(),
            phone: "+628120000001".to_string(),
            role: UserRole::Requester,
            university_id: Some("uni-1".to_string()),
            faculty: Some("Ilmu Komputer".to_string()),
            student_id_number: "2206000001".to_string(),
            is_verified: true,
            is_active: true,
            runner_is_online: false,
            rating_avg: 4.8,
            total_orders: 24,
            balance: 125000.0,
            referral_code: Some("ANA24".to_string()),
            last_active_at: Some(ts(2026, 8, 4, 13, 0)),
            created_at: ts(2026, 2, 11, 9, 30),
            updated_at: ts(2026, 8, 4, 13, 0),
        },
        User {
            id: "usr-2".to_string(),
            full_name: "Bima Prasetyo".to_string(),
            email: "bima@itb.ac.id".to_string(),
            phone: "+628120000002".to_string(),
            role: UserRole::Runner,
            university_id: Some("uni-2".to_string()),
            faculty: None,
            student_id_number: "2206000002".to_string(),
            is_verified: true,
            is_active: true,
            runner_is_online: true,
            rating_avg: 4.6,
            total_orders: 131,
            balance: 840000.0,
            referral_code: None,
            last_active_at: Some(ts(2026, 8, 5, 6, 45)),
            created_at: ts(2025, 11, 2, 14, 10),
            updated_at: ts(2026, 8, 5, 6, 45),
        },
        User {
            id: "usr-3".to_string(),
            full_name: "Cici Lestari".to_string(),
            email: "cici@ugm.ac.id".to_string(),
            phone: "+628120000003".to_string(),
            role: UserRole::Both,
            university_id: Some("uni-3".to_string()),
            faculty: Some("Hukum".to_string()),
            student_id_number: "2206000003".to_string(),
            is_verified: false,
            is_active: false,
            runner_is_online: false,
            rating_avg: 0.0,
            total_orders: 0,
            balance: 0.0,
            referral_code: None,
            last_active_at: None,
            created_at: ts(2026, 7, 28, 19, 5),
            updated_at: ts(2026, 7, 28, 19, 5),
        },
    ]
}

fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            id: "ord-1".to_string(),
            order_code: "CR-0001".to_string(),
            requester_id: "usr-1".to_string(),
            runner_id: Some("usr-2".to_string()),
            university_id: Some("uni-1".to_string()),
            service_type: Some(ServiceType::Print),
            title: "Print laporan KP 120 halaman".to_string(),
            pickup_location: "Percetakan Gerbang Depan".to_string(),
            delivery_location: "Gedung A, Lantai 3".to_string(),
            item_price: 36000.0,
            service_fee: 6000.0,
            platform_commission: 1200.0,
            total_amount: 42000.0,
            runner_earning: 4800.0,
            promo_code: None,
            discount_amount: 0.0,
            status: OrderStatus::Completed,
            cancelled_by: None,
            cancel_reason: None,
            completed_at: Some(ts(2026, 8, 1, 10, 15)),
            expired_at: ts(2026, 8, 1, 12, 0),
            is_rated: true,
            created_at: ts(2026, 8, 1, 8, 20),
            updated_at: ts(2026, 8, 1, 10, 15),
        },
        Order {
            id: "ord-2".to_string(),
            order_code: "CR-0002".to_string(),
            requester_id: "usr-3".to_string(),
            runner_id: None,
            university_id: Some("uni-3".to_string()),
            service_type: Some(ServiceType::Food),
            title: "Nasi ayam geprek kantin pusat".to_string(),
            pickup_location: "Kantin Pusat".to_string(),
            delivery_location: "Perpustakaan, Meja 12".to_string(),
            item_price: 18000.0,
            service_fee: 4000.0,
            platform_commission: 800.0,
            total_amount: 22000.0,
            runner_earning: 3200.0,
            promo_code: Some("GRATISONGKIR".to_string()),
            discount_amount: 4000.0,
            status: OrderStatus::Open,
            cancelled_by: None,
            cancel_reason: None,
            completed_at: None,
            expired_at: ts(2026, 8, 5, 12, 0),
            is_rated: false,
            created_at: ts(2026, 8, 5, 9, 40),
            updated_at: ts(2026, 8, 5, 9, 40),
        },
        Order {
            id: "ord-3".to_string(),
            order_code: "CR-0003".to_string(),
            requester_id: "usr-1".to_string(),
            runner_id: Some("usr-2".to_string()),
            university_id: Some("uni-1".to_string()),
            service_type: Some(ServiceType::Document),
            title: "Ambil transkrip di loket akademik".to_string(),
            pickup_location: "Loket Akademik".to_string(),
            delivery_location: "Asrama C".to_string(),
            item_price: 0.0,
            service_fee: 8000.0,
            platform_commission: 1600.0,
            total_amount: 8000.0,
            runner_earning: 6400.0,
            promo_code: None,
            discount_amount: 0.0,
            status: OrderStatus::Disputed,
            cancelled_by: None,
            cancel_reason: None,
            completed_at: None,
            expired_at: ts(2026, 8, 3, 16, 0),
            is_rated: false,
            created_at: ts(2026, 8, 3, 11, 0),
            updated_at: ts(2026, 8, 3, 15, 30),
        },
    ]
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "trx-1".to_string(),
            order_id: Some("ord-1".to_string()),
            user_id: Some("usr-1".to_string()),
            transaction_code: Some("PAY-88121".to_string()),
            payment_method: Some(PaymentMethod::Qris),
            payment_gateway: "midtrans".to_string(),
            amount: 42000.0,
            status: TransactionStatus::Paid,
            paid_at: Some(ts(2026, 8, 1, 8, 22)),
            created_at: ts(2026, 8, 1, 8, 21),
        },
        Transaction {
            id: "trx-2".to_string(),
            order_id: Some("ord-2".to_string()),
            user_id: Some("usr-3".to_string()),
            transaction_code: Some("PAY-88140".to_string()),
            payment_method: Some(PaymentMethod::Gopay),
            payment_gateway: "midtrans".to_string(),
            amount: 18000.0,
            status: TransactionStatus::Pending,
            paid_at: None,
            created_at: ts(2026, 8, 5, 9, 41),
        },
        Transaction {
            id: "trx-3".to_string(),
            order_id: None,
            user_id: Some("usr-2".to_string()),
            transaction_code: None,
            payment_method: Some(PaymentMethod::BankTransfer),
            payment_gateway: "manual".to_string(),
            amount: 100000.0,
            status: TransactionStatus::Failed,
            paid_at: None,
            created_at: ts(2026, 7, 30, 17, 5),
        },
    ]
}

fn sample_disbursements() -> Vec<Disbursement> {
    vec![
        Disbursement {
            id: "dsb-1".to_string(),
            runner_id: Some("usr-2".to_string()),
            amount: 500000.0,
            bank_name: "BCA".to_string(),
            account_number: "5270112233".to_string(),
            account_name: "Bima Prasetyo".to_string(),
            status: DisbursementStatus::Success,
            processed_by: Some("adm-2".to_string()),
            processed_at: Some(ts(2026, 8, 2, 10, 0)),
            note: None,
            created_at: ts(2026, 8, 1, 18, 30),
        },
        Disbursement {
            id: "dsb-2".to_string(),
            runner_id: Some("usr-2".to_string()),
            amount: 250000.0,
            bank_name: "Mandiri".to_string(),
            account_number: "1440098877".to_string(),
            account_name: "Bima Prasetyo".to_string(),
            status: DisbursementStatus::Pending,
            processed_by: None,
            processed_at: None,
            note: Some("menunggu verifikasi saldo".to_string()),
            created_at: ts(2026, 8, 5, 7, 10),
        },
    ]
}

fn sample_reports() -> Vec<Report> {
    vec![
        Report {
            id: "rpt-1".to_string(),
            reporter_id: Some("usr-1".to_string()),
            reported_user_id: Some("usr-2".to_string()),
            order_id: Some("ord-3".to_string()),
            reason: Some(ReportReason::FakeCompletion),
            description: "Order ditandai selesai tapi dokumen belum diterima".to_string(),
            status: ReportStatus::Investigating,
            resolution_note: None,
            resolved_by: None,
            created_at: ts(2026, 8, 3, 15, 35),
        },
        Report {
            id: "rpt-2".to_string(),
            reporter_id: Some("usr-3".to_string()),
            reported_user_id: None,
            order_id: None,
            reason: Some(ReportReason::Other),
            description: "Promo tidak terpasang saat checkout".to_string(),
            status: ReportStatus::Open,
            resolution_note: None,
            resolved_by: None,
            created_at: ts(2026, 8, 5, 10, 2),
        },
    ]
}

fn sample_universities() -> Vec<University> {
    vec![
        University {
            id: "uni-1".to_string(),
            name: "Universitas Indonesia".to_string(),
            city: "Depok".to_string(),
            province: "Jawa Barat".to_string(),
            logo_url: None,
            is_active: true,
            total_users: 1840,
            created_at: ts(2025, 9, 1, 0, 0),
        },
        University {
            id: "uni-2".to_string(),
            name: "Institut Teknologi Bandung".to_string(),
            city: "Bandung".to_string(),
            province: "Jawa Barat".to_string(),
            logo_url: None,
            is_active: true,
            total_users: 1210,
            created_at: ts(2025, 10, 15, 0, 0),
        },
        University {
            id: "uni-3".to_string(),
            name: "Universitas Gadjah Mada".to_string(),
            city: "Yogyakarta".to_string(),
            province: "DI Yogyakarta".to_string(),
            logo_url: None,
            is_active: false,
            total_users: 0,
            created_at: ts(2026, 6, 20, 0, 0),
        },
    ]
}

fn sample_promotions() -> Vec<Promotion> {
    vec![
        Promotion {
            id: "pro-1".to_string(),
            code: "GRATISONGKIR".to_string(),
            title: "Gratis biaya layanan minggu UTS".to_string(),
            kind: PromotionType::FreeServiceFee,
            value: 4000.0,
            is_percentage: false,
            min_transaction: 15000.0,
            max_usage: Some(500),
            used_count: 342,
            expired_at: Some(ts(2026, 8, 31, 17, 0)),
            is_active: true,
        },
        Promotion {
            id: "pro-2".to_string(),
            code: "CASHBACK10".to_string(),
            title: "Cashback 10% pengguna baru".to_string(),
            kind: PromotionType::Cashback,
            value: 10.0,
            is_percentage: true,
            min_transaction: 20000.0,
            max_usage: None,
            used_count: 87,
            expired_at: None,
            is_active: false,
        },
    ]
}

fn sample_admins() -> Vec<AdminAccount> {
    vec![
        AdminAccount {
            id: "adm-1".to_string(),
            name: "Rizky Hidayat".to_string(),
            email: "rizky@campusrun.id".to_string(),
            role: AdminRole::Superadmin,
            is_active: true,
            last_login_at: Some(ts(2026, 8, 5, 8, 0)),
            created_at: ts(2025, 9, 1, 0, 0),
        },
        AdminAccount {
            id: "adm-2".to_string(),
            name: "Siti Rahma".to_string(),
            email: "siti@campusrun.id".to_string(),
            role: AdminRole::Admin,
            is_active: true,
            last_login_at: Some(ts(2026, 8, 4, 16, 40)),
            created_at: ts(2025, 12, 12, 0, 0),
        },
        AdminAccount {
            id: "adm-3".to_string(),
            name: "Joko Santoso".to_string(),
            email: "joko@campusrun.id".to_string(),
            role: AdminRole::Support,
            is_active: false,
            last_login_at: None,
            created_at: ts(2026, 3, 3, 0, 0),
        },
    ]
}
