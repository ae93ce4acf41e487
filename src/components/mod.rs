pub mod header;
pub mod home_page;
pub mod like_button;
pub mod my_page;
pub mod new_review_page;
pub mod rating_display;
pub mod review_detail;
pub mod review_edit;
pub mod review_form;
pub mod review_search_form;
pub mod reviews_list;
pub mod venue_page;
