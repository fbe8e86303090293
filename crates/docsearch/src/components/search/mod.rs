mod results_panel;
mod search_box;

pub use results_panel::ResultsPanel;
pub use search_box::SearchBox;
