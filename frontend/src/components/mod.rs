pub mod admin_panel;
pub mod editable_student_name;
pub mod header;
pub mod student_table;
pub mod summary_dashboard;
