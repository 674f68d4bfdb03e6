//! Route-aware scan scheduling.
//!
//! The hook keeps at most one pending scan. A route change replaces whatever
//! is pending and returns a [`ScanTicket`]; the renderer hands that ticket
//! back with the content it committed for the change. A scan only runs for
//! the pending ticket, so commits produced by superseded route changes are
//! dropped even when they render the same path again (A, B, A). A burst of
//! route changes P1, P2, P3 yields exactly one scan, against P3's content.
//!
//! Everything runs on the caller's thread: the "wait for commit" step is the
//! pending entry itself, resumed by [`PresentationHook::content_committed`].

use crate::page::CommittedPage;
use crate::scan::{PageScan, ScanError, ScanReport};

/// Identifies one scheduled scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanTicket(u64);

/// What happened when content was committed.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The scan ran for the latest route.
    Ran(ScanReport),
    /// The scan ran and failed; the failure was logged and swallowed.
    Failed(ScanError),
    /// The commit belongs to a route that was superseded; no scan ran.
    Superseded,
    /// No scan was pending.
    Idle,
}

/// Counters for scan scheduling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HookStats {
    /// Scans that completed successfully.
    pub runs: u64,
    /// Scans that returned an error.
    pub failures: u64,
    /// Pending scans replaced by a newer route change.
    pub superseded: u64,
    /// Commits dropped because their route was no longer pending.
    pub stale_commits: u64,
}

#[derive(Debug)]
struct PendingScan {
    ticket: ScanTicket,
    path: String,
}

/// Re-runs a [`PageScan`] whenever the active route settles.
#[derive(Debug)]
pub struct PresentationHook<S> {
    scanner: S,
    next_ticket: u64,
    pending: Option<PendingScan>,
    stats: HookStats,
}

impl<S: PageScan> PresentationHook<S> {
    /// Create a hook around a scan.
    pub fn new(scanner: S) -> Self {
        Self {
            scanner,
            next_ticket: 0,
            pending: None,
            stats: HookStats::default(),
        }
    }

    /// Schedule the initial scan for the page the app mounted on.
    pub fn mount(&mut self, path: &str) -> ScanTicket {
        tracing::debug!(path, "Presentation hook mounted");
        self.schedule(path)
    }

    /// Schedule a scan for a newly settled route, superseding any pending one.
    pub fn route_changed(&mut self, path: &str) -> ScanTicket {
        self.schedule(path)
    }

    /// Run the pending scan if `page` was committed for the pending route change.
    ///
    /// `ticket` is the value returned by the [`mount`](Self::mount) or
    /// [`route_changed`](Self::route_changed) call that produced the commit.
    /// Scan errors are logged and returned as [`ScanOutcome::Failed`]; they
    /// never prevent later scans.
    pub fn content_committed(
        &mut self,
        ticket: ScanTicket,
        page: &CommittedPage,
    ) -> ScanOutcome {
        let Some(pending) = &self.pending else {
            return ScanOutcome::Idle;
        };

        if pending.ticket != ticket || pending.path != page.path {
            tracing::debug!(
                committed = %page.path,
                ticket = ticket.0,
                pending = %pending.path,
                pending_ticket = pending.ticket.0,
                "Dropping commit for superseded route change"
            );
            self.stats.stale_commits += 1;
            return ScanOutcome::Superseded;
        }

        self.pending = None;
        let ticket = ticket.0;
        match self.scanner.scan(page) {
            Ok(report) => {
                self.stats.runs += 1;
                tracing::debug!(
                    path = %page.path,
                    ticket,
                    attached = report.attached,
                    skipped = report.skipped,
                    "Page scan finished"
                );
                ScanOutcome::Ran(report)
            }
            Err(err) => {
                self.stats.failures += 1;
                tracing::warn!(path = %page.path, ticket, error = %err, "Page scan failed");
                ScanOutcome::Failed(err)
            }
        }
    }

    /// Drop the pending scan, e.g. when the app unmounts.
    pub fn cancel(&mut self) -> Option<ScanTicket> {
        self.pending.take().map(|p| p.ticket)
    }

    /// Pending scan ticket and route, if any.
    pub fn pending(&self) -> Option<(ScanTicket, &str)> {
        self.pending.as_ref().map(|p| (p.ticket, p.path.as_str()))
    }

    /// Scheduling counters.
    pub fn stats(&self) -> HookStats {
        self.stats
    }

    /// The wrapped scan.
    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    fn schedule(&mut self, path: &str) -> ScanTicket {
        let ticket = ScanTicket(self.next_ticket);
        self.next_ticket += 1;

        if let Some(previous) = self.pending.replace(PendingScan {
            ticket,
            path: path.to_owned(),
        }) {
            self.stats.superseded += 1;
            tracing::debug!(
                superseded = %previous.path,
                path,
                "Pending scan superseded by route change"
            );
        }

        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageImage;
    use pretty_assertions::assert_eq;

    /// Scan that records the pages it ran against.
    #[derive(Default)]
    struct RecordingScan {
        seen: Vec<(u64, String)>,
        fail_on: Option<String>,
    }

    impl PageScan for RecordingScan {
        fn scan(&mut self, page: &CommittedPage) -> Result<ScanReport, ScanError> {
            self.seen.push((page.commit_id, page.path.clone()));
            if self.fail_on.as_deref() == Some(page.path.as_str()) {
                return Err(ScanError::Other("boom".to_owned()));
            }
            Ok(ScanReport {
                attached: page.images.len(),
                skipped: 0,
            })
        }
    }

    fn page(commit_id: u64, path: &str) -> CommittedPage {
        CommittedPage::new(commit_id, path, vec![PageImage::new("a.png", "main")])
    }

    #[test]
    fn test_mount_runs_scan_after_commit() {
        let mut hook = PresentationHook::new(RecordingScan::default());

        let ticket = hook.mount("/");
        assert!(hook.scanner().seen.is_empty());

        let outcome = hook.content_committed(ticket, &page(1, "/"));

        assert!(matches!(outcome, ScanOutcome::Ran(ScanReport { attached: 1, .. })));
        assert_eq!(hook.scanner().seen, vec![(1, "/".to_owned())]);
        assert!(hook.pending().is_none());
    }

    #[test]
    fn test_commit_without_pending_is_idle() {
        let mut hook = PresentationHook::new(RecordingScan::default());
        let ticket = hook.mount("/");
        hook.cancel();

        let outcome = hook.content_committed(ticket, &page(1, "/"));

        assert!(matches!(outcome, ScanOutcome::Idle));
        assert!(hook.scanner().seen.is_empty());
    }

    #[test]
    fn test_burst_of_route_changes_runs_only_latest() {
        let mut hook = PresentationHook::new(RecordingScan::default());
        let root = hook.mount("/");
        hook.content_committed(root, &page(1, "/"));

        let p1 = hook.route_changed("/p1");
        let p2 = hook.route_changed("/p2");
        let p3 = hook.route_changed("/p3");

        assert!(matches!(
            hook.content_committed(p1, &page(2, "/p1")),
            ScanOutcome::Superseded
        ));
        assert!(matches!(
            hook.content_committed(p2, &page(3, "/p2")),
            ScanOutcome::Superseded
        ));
        assert_eq!(hook.pending(), Some((p3, "/p3")));
        assert!(matches!(
            hook.content_committed(p3, &page(4, "/p3")),
            ScanOutcome::Ran(_)
        ));

        assert_eq!(
            hook.scanner().seen,
            vec![(1, "/".to_owned()), (4, "/p3".to_owned())]
        );
        assert_eq!(
            hook.stats(),
            HookStats {
                runs: 2,
                failures: 0,
                superseded: 2,
                stale_commits: 2,
            }
        );
    }

    #[test]
    fn test_return_to_earlier_route_skips_replaced_content() {
        let mut hook = PresentationHook::new(RecordingScan::default());
        let root = hook.mount("/");
        hook.content_committed(root, &page(0, "/"));

        let first_a = hook.route_changed("/a");
        hook.route_changed("/b");
        let latest_a = hook.route_changed("/a");

        let stale = hook.content_committed(first_a, &page(1, "/a"));
        let fresh = hook.content_committed(latest_a, &page(3, "/a"));

        assert!(matches!(stale, ScanOutcome::Superseded));
        assert!(matches!(fresh, ScanOutcome::Ran(_)));
        assert_eq!(
            hook.scanner().seen,
            vec![(0, "/".to_owned()), (3, "/a".to_owned())]
        );
        assert_eq!(hook.stats().stale_commits, 1);
    }

    #[test]
    fn test_commit_for_other_path_is_stale() {
        let mut hook = PresentationHook::new(RecordingScan::default());
        let ticket = hook.mount("/a");

        let outcome = hook.content_committed(ticket, &page(1, "/b"));

        assert!(matches!(outcome, ScanOutcome::Superseded));
        assert_eq!(hook.pending(), Some((ticket, "/a")));
    }

    #[test]
    fn test_scan_runs_once_per_settled_route() {
        let mut hook = PresentationHook::new(RecordingScan::default());
        let ticket = hook.mount("/a");

        hook.content_committed(ticket, &page(1, "/a"));
        let second = hook.content_committed(ticket, &page(1, "/a"));

        assert!(matches!(second, ScanOutcome::Idle));
        assert_eq!(hook.scanner().seen.len(), 1);
    }

    #[test]
    fn test_failed_scan_does_not_block_later_scans() {
        let mut hook = PresentationHook::new(RecordingScan {
            fail_on: Some("/broken".to_owned()),
            ..RecordingScan::default()
        });

        let broken = hook.mount("/broken");
        let failed = hook.content_committed(broken, &page(1, "/broken"));
        let fine = hook.route_changed("/fine");
        let ok = hook.content_committed(fine, &page(2, "/fine"));

        assert!(matches!(failed, ScanOutcome::Failed(ScanError::Other(_))));
        assert!(matches!(ok, ScanOutcome::Ran(_)));
        assert_eq!(hook.stats().failures, 1);
        assert_eq!(hook.stats().runs, 1);
    }

    #[test]
    fn test_cancel_drops_pending_scan() {
        let mut hook = PresentationHook::new(RecordingScan::default());
        let ticket = hook.mount("/");

        assert_eq!(hook.cancel(), Some(ticket));
        assert!(matches!(
            hook.content_committed(ticket, &page(1, "/")),
            ScanOutcome::Idle
        ));
        assert!(hook.scanner().seen.is_empty());
    }

    #[test]
    fn test_tickets_increase() {
        let mut hook = PresentationHook::new(RecordingScan::default());

        let a = hook.mount("/");
        let b = hook.route_changed("/x");

        assert!(b > a);
    }

    #[test]
    fn test_closure_scan() {
        let mut count = 0;
        let mut hook = PresentationHook::new(|_: &CommittedPage| -> Result<ScanReport, ScanError> {
            count += 1;
            Ok(ScanReport::default())
        });

        let ticket = hook.mount("/");
        hook.content_committed(ticket, &page(1, "/"));
        drop(hook);

        assert_eq!(count, 1);
    }
}
