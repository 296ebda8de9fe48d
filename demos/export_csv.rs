//! CSV Export Example
//!
//! Exports the filtered (not paginated) rows of a view as CSV text.

use campusrun_admin::{to_csv, Column, Row, TableView};

fn main() {
    let rows = vec![
        Row::new()
            .with("name", "Ana Maharani")
            .with("email", "ana@ui.ac.id")
            .with("note", "alamat: Jl. Margonda, Depok"),
        Row::new()
            .with("name", "Bima Prasetyo")
            .with("email", "bima@itb.ac.id")
            .with("note", None::<String>),
        Row::new()
            .with("name", "Cici Lestari")
            .with("email", "cici@ugm.ac.id")
            .with("note", "titip di pos \"satpam\""),
    ];
    let columns = vec![
        Column::sortable("name", "Nama"),
        Column::sortable("email", "Email"),
        Column::new("note", "Catatan"),
    ];

    // Page size 2, but the export below still covers every filtered row.
    let mut view = TableView::with_page_size(rows, columns, 2).expect("valid page size");
    view.set_sort("name");

    println!("--- semua baris ---");
    println!("{}\n", to_csv(view.filtered_rows()));

    view.set_search_query("ac.id");
    println!("--- hasil pencarian 'ac.id' ---");
    println!("{}", to_csv(view.filtered_rows()));
}
