pub mod message_list;
pub mod password_gate;
pub mod post_form;
