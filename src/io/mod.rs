pub mod params_parser;
pub mod write_to_csv;
