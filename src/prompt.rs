//! Fixed instruction template that asks a model to rewrite Python as fast C++.

use crate::input::SourceInput;
use crate::types::Message;

const SYSTEM_INSTRUCTION: &str = "You are an assistant that reimplements Python code in high performance C++. \
Respond only with C++ code; use comments sparingly and do not provide any explanation other than occasional comments. \
The C++ response needs to produce an identical output in the fastest possible time.";

const USER_PREFIX: &str = "Rewrite this Python code in C++ with the fastest possible implementation that produces identical output in the least time. \
Respond only with C++ code; do not explain your work other than a few comments. \
Pay attention to number types to ensure no int overflows. \
Remember to #include all necessary C++ packages such as iomanip.";

/// System instruction plus user message for one translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    system: String,
    user: String,
}

impl Prompt {
    pub fn for_source(source: &SourceInput) -> Self {
        Self {
            system: SYSTEM_INSTRUCTION.to_string(),
            user: format!("{USER_PREFIX}\n\n{}", source.code()),
        }
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Provider-neutral `[system, user]` message list.
    pub fn to_messages(&self) -> Vec<Message> {
        vec![Message::system(&self.system), Message::user(&self.user)]
    }
}
