//! Caller and stacktrace capture

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;

/// Source location of a log call, captured at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub module_path: Option<&'static str>,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, module_path: Option<&'static str>) -> Self {
        Self {
            file,
            line,
            module_path,
        }
    }

    /// Location of the nearest caller not marked `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), None)
    }
}

/// One resolved stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub file: String,
    pub line: u32,
    pub function: String,
}

/// Turns a captured call site into a frame.
pub trait CallerResolver: fmt::Debug + Send + Sync {
    fn resolve(&self, site: &CallSite) -> Option<Frame>;
}

/// Resolves from the call site alone; the module path stands in for the
/// function name.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallSiteResolver;

impl CallerResolver for CallSiteResolver {
    fn resolve(&self, site: &CallSite) -> Option<Frame> {
        if site.file.is_empty() || site.line == 0 {
            return None;
        }
        Some(Frame {
            file: site.file.to_string(),
            line: site.line,
            function: site.module_path.unwrap_or_default().to_string(),
        })
    }
}

/// Render the current stack, dropping the first `skip` frames.
pub fn capture_stacktrace(skip: usize) -> String {
    let rendered = Backtrace::force_capture().to_string();
    let mut out = String::with_capacity(rendered.len());
    let mut frame = 0usize;
    let mut started = false;

    for line in rendered.lines() {
        if is_frame_header(line) {
            if started {
                frame += 1;
            }
            started = true;
        }
        if frame >= skip {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

// "  12: crate::module::function"
fn is_frame_header(line: &str) -> bool {
    match line.trim_start().split_once(": ") {
        Some((index, _)) => !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
