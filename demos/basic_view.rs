//! Basic Table View Example
//!
//! This example demonstrates:
//! - Building rows and column descriptors
//! - Searching, sorting, and paginating a table view
//! - Reading the computed page

use campusrun_admin::{Column, Row, TableView};

fn main() {
    println!("=== CampusRun Basic View Example ===\n");

    // 1. Build some order rows
    println!("1. Building rows...");
    let rows = vec![
        Row::new()
            .with("order_code", "CR-0001")
            .with("title", "Print laporan KP")
            .with("total_amount", 42000.0),
        Row::new()
            .with("order_code", "CR-0002")
            .with("title", "Nasi ayam geprek")
            .with("total_amount", 22000.0),
        Row::new()
            .with("order_code", "CR-0003")
            .with("title", "Ambil transkrip")
            .with("total_amount", 8000.0),
        Row::new()
            .with("order_code", "CR-0004")
            .with("title", "Print poster A2")
            .with("total_amount", None::<f64>),
    ];
    println!("   {} rows built\n", rows.len());

    // 2. Describe the columns
    let columns = vec![
        Column::sortable("order_code", "Kode"),
        Column::new("title", "Judul"),
        Column::sortable("total_amount", "Total"),
    ];

    // 3. Create the view
    let mut view = TableView::with_page_size(rows, columns, 3).expect("valid page size");

    // 4. Plain view
    println!("2. Unfiltered view:");
    print_page(&view);

    // 5. Search
    println!("3. Searching for 'print':");
    view.set_search_query("print");
    print_page(&view);

    // 6. Sort by amount (nulls always sort last)
    println!("4. Sorted by total, ascending:");
    view.set_search_query("");
    view.set_sort("total_amount");
    print_page(&view);

    // 7. Toggle to descending and page through
    view.set_sort("total_amount");
    println!("5. Sorted by total, descending, page 2:");
    view.set_page(2);
    print_page(&view);
}

fn print_page(view: &TableView) {
    let output = view.compute_view();
    for row in &output.rows {
        println!(
            "   {} | {} | {}",
            row.get("order_code").map(|v| v.to_string()).unwrap_or_default(),
            row.get("title").map(|v| v.to_string()).unwrap_or_default(),
            row.get("total_amount").map(|v| v.to_string()).unwrap_or_default(),
        );
    }
    println!(
        "   -- halaman {} dari {}, {} baris cocok\n",
        output.current_page, output.total_pages, output.total_filtered
    );
}
