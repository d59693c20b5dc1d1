/// Peak resident set size of this process in bytes, if the platform
/// reports one.
#[cfg(unix)]
pub fn peak_rss_bytes() -> Option<u64> {
    // SAFETY: `getrusage` only writes into the zeroed struct we hand it.
    let usage = unsafe {
        let mut usage: libc::rusage = std::mem::zeroed();
        if libc::getrusage(libc::RUSAGE_SELF, &mut usage) != 0 {
            return None;
        }
        usage
    };
    let max_rss = u64::try_from(usage.ru_maxrss).ok()?;
    // Linux reports kilobytes, macOS bytes.
    if cfg!(target_os = "macos") {
        Some(max_rss)
    } else {
        Some(max_rss * 1024)
    }
}

#[cfg(not(unix))]
pub fn peak_rss_bytes() -> Option<u64> {
    None
}

/// Snapshot of the peak RSS taken before a search starts.
#[derive(Debug, Clone, Copy)]
pub struct MemoryBaseline(Option<u64>);

impl MemoryBaseline {
    pub fn capture() -> Self {
        Self(peak_rss_bytes())
    }

    /// Growth of the peak RSS since the baseline, in megabytes.
    pub fn growth_mb(&self) -> f64 {
        match (self.0, peak_rss_bytes()) {
            (Some(before), Some(after)) => after.saturating_sub(before) as f64 / (1024.0 * 1024.0),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_is_never_negative() {
        let baseline = MemoryBaseline::capture();
        let buffer = vec![1u8; 4 * 1024 * 1024];
        assert!(buffer.iter().all(|&b| b == 1));
        assert!(baseline.growth_mb() >= 0.0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_reports_peak_rss() {
        assert!(peak_rss_bytes().unwrap_or(0) > 0);
    }
}
