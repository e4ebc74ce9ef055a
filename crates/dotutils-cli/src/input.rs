use dotutils_core::resolver::LineSource;
use std::io::{self, BufRead};

/// Prompted values read line by line from stdin. The prompt itself is
/// printed by the resolver's console.
pub struct Stdin {
    inner: io::StdinLock<'static>,
}

impl Stdin {
    pub fn lock() -> Self {
        Self {
            inner: io::stdin().lock(),
        }
    }
}

impl LineSource for Stdin {
    fn next_line(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
