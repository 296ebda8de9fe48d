//! Marketplace records rendered by the dashboard.
//!
//! Typed shapes of the remote store rows backing the eight dashboard tables
//! (users, orders, transactions, disbursements, reports, universities,
//! promotions, admin accounts), the status vocabulary shown in badges, and
//! the id-ID display formatting. Each record's `to_row` bridges it into the
//! generic table engine: raw wire values go into the row, so sorting and
//! searching stay on the raw data while column renderers handle display.

use crate::access::AdminRole;
use crate::row::Row;
use crate::value::CellValue;
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// How a marketplace account participates in deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Requester,
    Runner,
    Both,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Requester => "requester",
            UserRole::Runner => "runner",
            UserRole::Both => "both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Print,
    Food,
    Document,
    Koperasi,
    Other,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Print => "print",
            ServiceType::Food => "food",
            ServiceType::Document => "document",
            ServiceType::Koperasi => "koperasi",
            ServiceType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    Taken,
    OnProcess,
    Delivered,
    Completed,
    Cancelled,
    Disputed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Taken => "taken",
            OrderStatus::OnProcess => "on_process",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Disputed => "disputed",
        }
    }

    /// Human label shown in status badges.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Open => "Open",
            OrderStatus::Taken => "Taken",
            OrderStatus::OnProcess => "On Process",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Disputed => "Disputed",
        }
    }
}

/// Who cancelled an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelledBy {
    Requester,
    Runner,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Qris,
    Gopay,
    Ovo,
    Dana,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Qris => "qris",
            PaymentMethod::Gopay => "gopay",
            PaymentMethod::Ovo => "ovo",
            PaymentMethod::Dana => "dana",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Paid => "paid",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Refunded => "refunded",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Paid => "Paid",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Refunded => "Refunded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementStatus {
    Pending,
    Processing,
    Success,
    Failed,
}

impl DisbursementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisbursementStatus::Pending => "pending",
            DisbursementStatus::Processing => "processing",
            DisbursementStatus::Success => "success",
            DisbursementStatus::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisbursementStatus::Pending => "Pending",
            DisbursementStatus::Processing => "Processing",
            DisbursementStatus::Success => "Success",
            DisbursementStatus::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    Fraud,
    ItemMissing,
    Harassment,
    FakeCompletion,
    Other,
}

impl ReportReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Fraud => "fraud",
            ReportReason::ItemMissing => "item_missing",
            ReportReason::Harassment => "harassment",
            ReportReason::FakeCompletion => "fake_completion",
            ReportReason::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Open,
    Investigating,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::Investigating => "investigating",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Dismissed => "dismissed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Open => "Open",
            ReportStatus::Investigating => "Investigating",
            ReportStatus::Resolved => "Resolved",
            ReportStatus::Dismissed => "Dismissed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionType {
    Discount,
    Cashback,
    FreeServiceFee,
}

impl PromotionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromotionType::Discount => "discount",
            PromotionType::Cashback => "cashback",
            PromotionType::FreeServiceFee => "free_service_fee",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    pub id: String,
    pub name: String,
    pub city: String,
    pub province: String,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub total_users: u32,
    pub created_at: DateTime<Utc>,
}

impl University {
    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("name", self.name.as_str())
            .with("city", self.city.as_str())
            .with("province", self.province.as_str())
            .with("is_active", self.is_active)
            .with("total_users", self.total_users)
            .with("created_at", timestamp_cell(&self.created_at))
    }
}

/// A back-office account (the dashboard's own operators).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AdminAccount {
    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("role", self.role.as_str())
            .with("is_active", self.is_active)
            .with("last_login_at", optional_timestamp_cell(self.last_login_at.as_ref()))
            .with("created_at", timestamp_cell(&self.created_at))
    }
}

/// A marketplace account (requester and/or runner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub university_id: Option<String>,
    pub faculty: Option<String>,
    pub student_id_number: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub runner_is_online: bool,
    pub rating_avg: f64,
    pub total_orders: u32,
    pub balance: f64,
    pub referral_code: Option<String>,
    pub last_active_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("name", self.full_name.as_str())
            .with("email", self.email.as_str())
            .with("role", self.role.as_str())
            .with("is_verified", self.is_verified)
            .with("is_active", self.is_active)
            .with("rating_avg", self.rating_avg)
            .with("total_orders", self.total_orders)
            .with("balance", self.balance)
            .with("created_at", timestamp_cell(&self.created_at))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_code: String,
    pub requester_id: String,
    pub runner_id: Option<String>,
    pub university_id: Option<String>,
    pub service_type: Option<ServiceType>,
    pub title: String,
    pub pickup_location: String,
    pub delivery_location: String,
    pub item_price: f64,
    pub service_fee: f64,
    pub platform_commission: f64,
    pub total_amount: f64,
    pub runner_earning: f64,
    pub promo_code: Option<String>,
    pub discount_amount: f64,
    pub status: OrderStatus,
    pub cancelled_by: Option<CancelledBy>,
    pub cancel_reason: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub expired_at: DateTime<Utc>,
    pub is_rated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("order_code", self.order_code.as_str())
            .with("title", self.title.as_str())
            .with(
                "service_type",
                self.service_type.map(|s| s.as_str().to_string()),
            )
            .with("status", self.status.as_str())
            .with("total_amount", self.total_amount)
            .with("runner_earning", self.runner_earning)
            .with("created_at", timestamp_cell(&self.created_at))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub order_id: Option<String>,
    pub user_id: Option<String>,
    pub transaction_code: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_gateway: String,
    pub amount: f64,
    pub status: TransactionStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("transaction_code", self.transaction_code.clone())
            .with(
                "payment_method",
                self.payment_method.map(|m| m.as_str().to_string()),
            )
            .with("payment_gateway", self.payment_gateway.as_str())
            .with("amount", self.amount)
            .with("status", self.status.as_str())
            .with("paid_at", optional_timestamp_cell(self.paid_at.as_ref()))
            .with("created_at", timestamp_cell(&self.created_at))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disbursement {
    pub id: String,
    pub runner_id: Option<String>,
    pub amount: f64,
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    pub status: DisbursementStatus,
    pub processed_by: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Disbursement {
    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("account_name", self.account_name.as_str())
            .with("bank_name", self.bank_name.as_str())
            .with("account_number", self.account_number.as_str())
            .with("amount", self.amount)
            .with("status", self.status.as_str())
            .with(
                "processed_at",
                optional_timestamp_cell(self.processed_at.as_ref()),
            )
            .with("created_at", timestamp_cell(&self.created_at))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    pub code: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: PromotionType,
    pub value: f64,
    pub is_percentage: bool,
    pub min_transaction: f64,
    pub max_usage: Option<u32>,
    pub used_count: u32,
    pub expired_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Promotion {
    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("code", self.code.as_str())
            .with("title", self.title.as_str())
            .with("type", self.kind.as_str())
            .with("value", self.value)
            .with("is_percentage", self.is_percentage)
            .with("used_count", self.used_count)
            .with("is_active", self.is_active)
            .with("expired_at", optional_timestamp_cell(self.expired_at.as_ref()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub reporter_id: Option<String>,
    pub reported_user_id: Option<String>,
    pub order_id: Option<String>,
    pub reason: Option<ReportReason>,
    pub description: String,
    pub status: ReportStatus,
    pub resolution_note: Option<String>,
    pub resolved_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn to_row(&self) -> Row {
        Row::new()
            .with("id", self.id.as_str())
            .with("reason", self.reason.map(|r| r.as_str().to_string()))
            .with("description", self.description.as_str())
            .with("status", self.status.as_str())
            .with("created_at", timestamp_cell(&self.created_at))
    }
}

fn timestamp_cell(ts: &DateTime<Utc>) -> CellValue {
    CellValue::Text(ts.to_rfc3339())
}

fn optional_timestamp_cell(ts: Option<&DateTime<Utc>>) -> CellValue {
    match ts {
        Some(ts) => timestamp_cell(ts),
        None => CellValue::Null,
    }
}

/// Western Indonesia Time, UTC+7.
const WIB_OFFSET_SECONDS: i32 = 7 * 3600;

/// Indonesian short month names, January first.
const MONTHS_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// `Rp 1.500.000` — id-ID digit grouping, no fraction digits.
pub fn format_currency_idr(value: f64) -> String {
    let negative = value < 0.0;
    let digits = format!("{}", value.abs().round() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// `05 Agu 2026 14:30 WIB` — the dashboard's timestamp form.
pub fn format_datetime_wib(ts: &DateTime<Utc>) -> String {
    let offset =
        FixedOffset::east_opt(WIB_OFFSET_SECONDS).expect("UTC+7 is a valid fixed offset");
    let wib = ts.with_timezone(&offset);
    format!(
        "{:02} {} {} {:02}:{:02} WIB",
        wib.day(),
        MONTHS_ID[wib.month0() as usize],
        wib.year(),
        wib.hour(),
        wib.minute()
    )
}

/// Render an RFC 3339 timestamp cell for display; blank or unparsable
/// values show as `-`.
pub fn render_timestamp_wib(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| format_datetime_wib(&ts.with_timezone(&Utc)))
        .unwrap_or_else(|_| "-".to_string())
}
