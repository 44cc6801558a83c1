pub mod url_record;
pub mod url_visit;
