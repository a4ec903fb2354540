//! CSV export of the filtered set.
//!
//! Fields are comma-joined without quoting, and list fields are joined with
//! `|`. A value containing a comma therefore shifts the columns of its row.

use tracing::debug;

use coopscope_common::Cooperative;

pub const CSV_HEADER: &str = "Cooperative Name,Official Name,District,GPS,Sector,Value Chain,Linked Buyer,Membership Size,Production Capacity,Capacity Unit,Product Focus,Certifications,Export History,FDI Priority,ESG/SDG,Partners,Contact";

const LIST_SEPARATOR: &str = "|";

/// A rendered export, ready for the download collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub body: String,
}

/// Header line plus one line per record, newline-separated, no trailing
/// newline.
pub fn export_csv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Cooperative>,
{
    let mut lines = vec![CSV_HEADER.to_string()];
    lines.extend(records.into_iter().map(csv_row));
    debug!(rows = lines.len() - 1, "CSV export rendered");
    lines.join("\n")
}

fn csv_row(record: &Cooperative) -> String {
    let export_history: Vec<&str> = record.export_history.iter().map(|r| r.as_str()).collect();
    [
        record.name.clone(),
        record.official_name.clone(),
        record.district.clone(),
        record.gps.clone(),
        record.sector.clone(),
        record.value_chain.to_string(),
        record.buyer.clone(),
        record.members.to_string(),
        record.capacity.to_string(),
        record.capacity_unit.clone(),
        record.product_focus.clone(),
        record.certifications.join(LIST_SEPARATOR),
        export_history.join(LIST_SEPARATOR),
        record.fdi_priority.clone(),
        record.esg_tags.join(LIST_SEPARATOR),
        record.partners.join(LIST_SEPARATOR),
        record.contact.clone(),
    ]
    .join(",")
}
