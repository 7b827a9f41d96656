pub mod object_url;
pub mod post_form;
pub mod request_destination;
