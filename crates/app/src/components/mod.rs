mod highlighted;
mod result_list;
mod search_form;

pub use highlighted::HighlightedText;
pub use result_list::ResultList;
pub use search_form::SearchForm;
