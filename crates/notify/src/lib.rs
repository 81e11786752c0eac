pub mod deny_list;
pub mod dingtalk;
pub mod discord;
pub mod email;
pub mod lark;
pub mod pagerduty;
pub mod pushover;
pub mod ses;
pub mod slack;
pub mod telegram;

mod http;
