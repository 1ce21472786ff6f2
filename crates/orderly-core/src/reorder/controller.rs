use crate::{
    authority::{AuthorityError, OrderAuthority},
    collection::{OrderedStore, Snapshot},
    config::{InFlightPolicy, ReorderConfig},
    entity::OrderedEntity,
    error::InternalError,
    gate::{ViewState, gate_block},
    notify::{Notice, Notifier},
    obs::sink::{ReorderEvent, record},
    reorder::{Move, ReorderOutcome, ReorderRejection, ReorderRequest, apply_move},
};
use std::collections::BTreeSet;

///
/// PendingReorder
///
/// One reorder between optimistic apply and settlement.
/// Carries the pre-move snapshot it restores on failure.
///

#[derive(Debug)]
#[must_use = "a pending reorder must be settled or abandoned"]
pub struct PendingReorder<E> {
    ticket: u64,
    mv: Move,
    previous: Snapshot<E>,
    request: ReorderRequest,
}

impl<E> PendingReorder<E> {
    #[must_use]
    pub const fn ticket(&self) -> u64 {
        self.ticket
    }

    #[must_use]
    pub const fn request(&self) -> &ReorderRequest {
        &self.request
    }

    #[must_use]
    pub const fn previous(&self) -> &Snapshot<E> {
        &self.previous
    }

    #[must_use]
    pub const fn mv(&self) -> Move {
        self.mv
    }
}

///
/// ReorderController
///
/// Owns the store and is the only component with side effects.
///
/// Two entry styles:
/// - `reorder` runs the whole protocol against a synchronous authority,
///   including the refetch after a confirmed write.
/// - `begin` + `settle` split it at the network boundary so an event loop
///   can drive the authority call itself. `settle` never calls the
///   authority; when `refetch_due` says so, the driver fetches the list and
///   feeds it back through `apply_refetch`.
///
/// A pending reorder whose result will never arrive is given up with
/// `abandon`. `refresh` discards every pending reorder, since they were
/// computed against the snapshot it replaces.
///
/// Failures never escape as errors; they are reported through the notifier
/// and the store is left showing either the old or the new order.
///

pub struct ReorderController<E, A, N> {
    store: OrderedStore<E>,
    authority: A,
    notifier: N,
    config: ReorderConfig,
    outstanding: BTreeSet<u64>,
    next_ticket: u64,
}

impl<E, A, N> ReorderController<E, A, N>
where
    E: OrderedEntity,
    A: OrderAuthority<E>,
    N: Notifier,
{
    pub fn new(config: ReorderConfig, authority: A, notifier: N) -> Self {
        Self {
            store: OrderedStore::new(),
            authority,
            notifier,
            config,
            outstanding: BTreeSet::new(),
            next_ticket: 0,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &OrderedStore<E> {
        &self.store
    }

    #[must_use]
    pub fn current_snapshot(&self) -> Snapshot<E> {
        self.store.current_snapshot()
    }

    #[must_use]
    pub const fn config(&self) -> &ReorderConfig {
        &self.config
    }

    pub const fn authority(&self) -> &A {
        &self.authority
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Reorders awaiting settlement.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.outstanding.len()
    }

    /// Fresh view state using this collection's filter sentinel.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        ViewState::with_sentinel(&self.config.filter_all_sentinel)
    }

    /// Whether a drag handle should currently be enabled.
    #[must_use]
    pub fn can_reorder(&self, view: &ViewState) -> bool {
        view.is_reorder_allowed() && !self.blocked_by_in_flight()
    }

    /// Upstream collection changed (new fetch, new page, new results).
    ///
    /// Pending reorders are discarded; settling one afterwards leaves the
    /// store alone. On error the previous snapshot and pending reorders are
    /// kept.
    pub fn refresh(&mut self, entities: Vec<E>) -> Result<(), InternalError> {
        self.store.set_snapshot(entities)?;

        if !self.outstanding.is_empty() {
            tracing::debug!(
                collection = %self.config.collection,
                discarded = self.outstanding.len(),
                "refresh discarded pending reorders"
            );
            self.outstanding.clear();
        }

        Ok(())
    }

    /// Run the full protocol for one gesture.
    pub fn reorder(&mut self, start: usize, end: usize, view: &ViewState) -> ReorderOutcome {
        match self.begin(start, end, view) {
            Err(rejection) => ReorderOutcome::Rejected(rejection),
            Ok(None) => ReorderOutcome::Unchanged,
            Ok(Some(pending)) => {
                let result = self.authority.persist_order(pending.request());
                let outcome = self.settle(pending, result);
                if self.refetch_due(&outcome) {
                    self.refetch();
                }

                outcome
            }
        }
    }

    /// Check eligibility, apply the move optimistically and build the
    /// request.
    ///
    /// `Ok(None)` is a no-op move. `Err` has already been reported to the
    /// notifier; it is returned so a driver can tell the cases apart.
    pub fn begin(
        &mut self,
        start: usize,
        end: usize,
        view: &ViewState,
    ) -> Result<Option<PendingReorder<E>>, ReorderRejection> {
        record(ReorderEvent::Started);

        if let Some(block) = gate_block(view) {
            self.notifier.notify(Notice::persistent_info(block.to_string()));
            return Err(self.reject(ReorderRejection::GateClosed(block)));
        }

        if self.blocked_by_in_flight() {
            self.notifier
                .notify(Notice::error(self.config.messages.in_flight.clone()));
            return Err(self.reject(ReorderRejection::InFlight));
        }

        let mv = Move::new(start, end);
        let previous = self.store.current_snapshot();

        let Some(updated) = apply_move(&previous, mv) else {
            self.notifier
                .notify(Notice::error(self.config.messages.out_of_range.clone()));
            return Err(self.reject(ReorderRejection::OutOfRange {
                start,
                end,
                len: previous.len(),
            }));
        };

        if mv.is_noop() {
            record(ReorderEvent::Unchanged);
            return Ok(None);
        }

        // Optimistic: visible before the authority is contacted.
        let updated = Snapshot::from_permutation(updated);
        self.store.replace(updated.clone());
        tracing::debug!(
            collection = %self.config.collection,
            start,
            end,
            "reorder applied optimistically"
        );

        let request = match ReorderRequest::from_entities(&updated) {
            Ok(request) => request,
            Err(rejection) => {
                self.store.replace(previous);
                self.notifier
                    .notify(Notice::error(self.config.messages.missing_id.clone()));
                return Err(self.reject(rejection));
            }
        };

        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.outstanding.insert(self.next_ticket);
        record(ReorderEvent::Applied {
            len: request.len() as u64,
        });

        Ok(Some(PendingReorder {
            ticket: self.next_ticket,
            mv,
            previous,
            request,
        }))
    }

    /// Feed the authority's answer for one pending reorder.
    ///
    /// Never contacts the authority; see `refetch_due`.
    pub fn settle(
        &mut self,
        pending: PendingReorder<E>,
        result: Result<(), AuthorityError>,
    ) -> ReorderOutcome {
        if !self.outstanding.remove(&pending.ticket) {
            return self.settle_discarded(&pending, result);
        }

        match result {
            Ok(()) => {
                record(ReorderEvent::Confirmed);
                tracing::debug!(
                    collection = %self.config.collection,
                    ticket = pending.ticket,
                    "reorder confirmed"
                );
                self.notifier
                    .notify(Notice::success(self.config.messages.success.clone()));

                ReorderOutcome::Confirmed
            }
            Err(err) => {
                // Full replacement, never a merge.
                self.store.replace(pending.previous);
                record(ReorderEvent::RolledBack);
                tracing::warn!(
                    collection = %self.config.collection,
                    ticket = pending.ticket,
                    start = pending.mv.start,
                    end = pending.mv.end,
                    "reorder rolled back: {err}"
                );
                self.notifier
                    .notify(Notice::error(err.user_message(&self.config.messages.failure)));

                ReorderOutcome::RolledBack(err)
            }
        }
    }

    /// Give up on a pending reorder whose result will never arrive.
    ///
    /// Restores the snapshot it captured, as a failure would, without a
    /// notice. Abandoning one already discarded by `refresh` does nothing.
    pub fn abandon(&mut self, pending: PendingReorder<E>) {
        if !self.outstanding.remove(&pending.ticket) {
            return;
        }

        self.store.replace(pending.previous);
        record(ReorderEvent::Abandoned);
        tracing::debug!(
            collection = %self.config.collection,
            ticket = pending.ticket,
            "pending reorder abandoned, previous order restored"
        );
    }

    /// True when `outcome` confirmed a write and this collection wants the
    /// canonical list fetched afterwards.
    #[must_use]
    pub const fn refetch_due(&self, outcome: &ReorderOutcome) -> bool {
        self.config.refetch_on_success && matches!(outcome, ReorderOutcome::Confirmed)
    }

    /// Fetch the canonical list through the authority and apply it.
    /// Returns whether the store was replaced.
    pub fn refetch(&mut self) -> bool {
        match self.authority.refetch() {
            Some(result) => self.apply_refetch(result),
            None => false,
        }
    }

    /// Apply a refetch result obtained by the driver.
    ///
    /// A failed or invalid refetch keeps the optimistic order. Pending
    /// reorders are left untouched. Returns whether the store was replaced.
    pub fn apply_refetch(&mut self, result: Result<Vec<E>, AuthorityError>) -> bool {
        let applied = result
            .map_err(|e| e.to_string())
            .and_then(|entities| self.store.set_snapshot(entities).map_err(|e| e.to_string()));

        match applied {
            Ok(()) => {
                record(ReorderEvent::Refetch { ok: true });
                true
            }
            Err(err) => {
                record(ReorderEvent::Refetch { ok: false });
                tracing::warn!(
                    collection = %self.config.collection,
                    "refetch after reorder failed, keeping optimistic order: {err}"
                );
                false
            }
        }
    }

    // The reorder was discarded by a refresh; the store already shows the
    // upstream list, so only a failure is worth telling the user about.
    fn settle_discarded(
        &self,
        pending: &PendingReorder<E>,
        result: Result<(), AuthorityError>,
    ) -> ReorderOutcome {
        record(ReorderEvent::Discarded);
        tracing::debug!(
            collection = %self.config.collection,
            ticket = pending.ticket,
            accepted = result.is_ok(),
            "settled a reorder discarded by refresh"
        );

        if let Err(err) = result {
            self.notifier
                .notify(Notice::error(err.user_message(&self.config.messages.failure)));
        }

        ReorderOutcome::Discarded
    }

    fn blocked_by_in_flight(&self) -> bool {
        matches!(self.config.in_flight, InFlightPolicy::Block) && !self.outstanding.is_empty()
    }

    fn reject(&self, rejection: ReorderRejection) -> ReorderRejection {
        record(ReorderEvent::Rejected {
            reason: rejection.reason(),
        });
        tracing::debug!(
            collection = %self.config.collection,
            "reorder rejected: {rejection}"
        );

        rejection
    }
}

///
/// TESTS
///
