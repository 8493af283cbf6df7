pub mod menu;
pub mod multiplication_table;
pub mod progress_bar;
pub mod progress_dashboard;
pub mod question_card;
pub mod result_card;
pub mod table_picker;
pub mod training_card;
