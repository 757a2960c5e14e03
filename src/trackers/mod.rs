mod jira;
mod models;
mod notion;
mod slack;

pub use jira::*;
pub use models::*;
pub use notion::*;
pub use slack::*;

#[cfg(test)]
pub use jira::MockJira;
#[cfg(test)]
pub use notion::MockNotion;
#[cfg(test)]
pub use slack::MockSlack;
