//! Mock implementations for testing

mod feishu;
mod notifier;

pub use feishu::MockFeishu;
pub use notifier::MockNotifier;
