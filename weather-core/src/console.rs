use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

/// Line-oriented output channel that observers report to.
///
/// Clones share the same target, so a captured console can be handed to
/// several observers and read back in emission order.
#[derive(Debug, Clone, Default)]
pub struct Console {
    captured: Option<Rc<RefCell<Vec<String>>>>,
}

impl Console {
    /// Write every line to the process stdout.
    pub fn stdout() -> Self {
        Self { captured: None }
    }

    /// Keep lines in memory instead of printing them.
    pub fn capture() -> Self {
        Self { captured: Some(Rc::default()) }
    }

    pub fn is_captured(&self) -> bool {
        self.captured.is_some()
    }

    pub fn emit(&self, line: &str) -> io::Result<()> {
        match &self.captured {
            Some(buf) => {
                buf.borrow_mut().push(line.to_owned());
                Ok(())
            }
            None => {
                let mut out = io::stdout().lock();
                writeln!(out, "{line}")
            }
        }
    }

    /// Lines captured so far; always empty for a stdout console.
    pub fn lines(&self) -> Vec<String> {
        self.captured.as_ref().map(|buf| buf.borrow().clone()).unwrap_or_default()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        self.captured.as_ref().map(|buf| buf.take()).unwrap_or_default()
    }
}
