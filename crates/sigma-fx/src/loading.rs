//! Loading animation variants and the factory keyed by mission kind.

use sigma_types::Canvas;
use sigma_types::error::Result;

use crate::download::DownloadFx;
use crate::rain::HackingFx;

/// A loading animation. Closed set of variants; unknown kinds fall back to
/// `Hacking`.
pub enum LoadingFx {
    Hacking(HackingFx),
    Download(DownloadFx),
}

impl LoadingFx {
    /// Build the animation for a mission `kind` tag. The default (and the
    /// fallback for unknown tags) is the binary-rain hacking animation.
    pub fn for_kind(kind: &str, width: u32, height: u32, seed: u64) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "download" => LoadingFx::Download(DownloadFx::new(width, height, seed)),
            "hack" => LoadingFx::Hacking(HackingFx::new(width, height, seed)),
            other => {
                log::debug!("no animation for kind '{other}', defaulting to hack");
                LoadingFx::Hacking(HackingFx::new(width, height, seed))
            },
        }
    }

    /// Total duration of this variant.
    pub fn duration_ms(&self) -> u32 {
        match self {
            LoadingFx::Hacking(fx) => fx.timer().duration_ms(),
            LoadingFx::Download(fx) => fx.timer().duration_ms(),
        }
    }

    /// Completion fraction in `[0, 1]`, monotonic non-decreasing.
    pub fn progress(&self) -> f32 {
        match self {
            LoadingFx::Hacking(fx) => fx.timer().progress(),
            LoadingFx::Download(fx) => fx.timer().progress(),
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            LoadingFx::Hacking(fx) => fx.timer().is_complete(),
            LoadingFx::Download(fx) => fx.timer().is_complete(),
        }
    }

    /// Advance by `dt_ms`; returns completion. No-op once complete.
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        match self {
            LoadingFx::Hacking(fx) => fx.advance(dt_ms),
            LoadingFx::Download(fx) => fx.advance(dt_ms),
        }
    }

    /// Skip straight to completion (the designated skip key uses this).
    pub fn finish(&mut self) {
        match self {
            LoadingFx::Hacking(fx) => fx.finish(),
            LoadingFx::Download(fx) => fx.finish(),
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) -> Result<()> {
        match self {
            LoadingFx::Hacking(fx) => fx.render(canvas),
            LoadingFx::Download(fx) => fx.render(canvas),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_kind_selects_download_variant() {
        let fx = LoadingFx::for_kind("download", 800, 600, 0);
        assert!(matches!(fx, LoadingFx::Download(_)));
        assert_eq!(fx.duration_ms(), 4000);
    }

    #[test]
    fn hack_kind_selects_hacking_variant() {
        let fx = LoadingFx::for_kind("hack", 800, 600, 0);
        assert!(matches!(fx, LoadingFx::Hacking(_)));
        assert_eq!(fx.duration_ms(), 3500);
    }

    #[test]
    fn unknown_kind_falls_back_to_hacking() {
        let fx = LoadingFx::for_kind("quantum_tunnel", 800, 600, 0);
        assert!(matches!(fx, LoadingFx::Hacking(_)));
    }

    #[test]
    fn kind_matching_is_case_insensitive() {
        let fx = LoadingFx::for_kind("Download", 800, 600, 0);
        assert!(matches!(fx, LoadingFx::Download(_)));
    }

    #[test]
    fn download_completes_at_4000ms() {
        let mut fx = LoadingFx::for_kind("download", 800, 600, 0);
        fx.advance(4000);
        assert!(fx.is_complete());
        assert!((fx.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn progress_monotonic_across_variants() {
        for kind in ["hack", "download"] {
            let mut fx = LoadingFx::for_kind(kind, 800, 600, 7);
            let mut last = 0.0;
            for _ in 0..300 {
                fx.advance(17);
                assert!(fx.progress() >= last);
                last = fx.progress();
            }
            assert!(fx.is_complete());
        }
    }

    #[test]
    fn finish_skips_to_complete() {
        let mut fx = LoadingFx::for_kind("hack", 800, 600, 0);
        fx.advance(100);
        fx.finish();
        assert!(fx.is_complete());
    }
}
