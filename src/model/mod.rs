pub mod punch_action;
pub mod punch_card;
