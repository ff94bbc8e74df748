pub mod change_records;
