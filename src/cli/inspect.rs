use anyhow::Result;
use log::info;
use std::path::PathBuf;

use rdepack::manifest::ExcelInvoice;

/// Parse an ExcelInvoice manifest and print its tables.
pub fn run(manifest: PathBuf) -> Result<()> {
    info!("rdepack inspect");
    info!("File: {}", manifest.display());

    let invoice = ExcelInvoice::read(&manifest)?;

    println!("main table: {} row(s)", invoice.main.len());
    println!("columns:");
    for column in invoice.main.columns() {
        println!("  {column}");
    }
    for (i, row) in invoice.main.rows().enumerate() {
        println!("row {i}: {}", row.join(" | "));
    }

    println!("generalTerm: {} row(s)", invoice.general_terms.len());
    for term in &invoice.general_terms {
        println!("  {} -> {}", term.term_id, term.key_name);
    }
    println!("specificTerm: {} row(s)", invoice.specific_terms.len());
    for term in &invoice.specific_terms {
        println!(
            "  ({}, {}) -> {}",
            term.sample_class_id, term.term_id, term.key_name
        );
    }

    Ok(())
}
