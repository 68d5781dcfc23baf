pub mod csv_exporter;
pub mod html_exporter;
