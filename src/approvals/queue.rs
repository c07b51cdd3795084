use chrono::Utc;

use crate::notify::{NotificationSink, NotifyOptions};
use crate::utils::contains_ignore_case;

use super::audit::AuditLog;
use super::request::{
    ApprovalRequest, ApprovalRequestInput, Priority, RequestStatus, RequestType,
};

/// Listener for the pending-request count (e.g. a navigation badge).
pub trait ApprovalCountObserver {
    fn on_approvals_count_change(&self, count: usize);
}

impl<F: Fn(usize)> ApprovalCountObserver for F {
    fn on_approvals_count_change(&self, count: usize) {
        self(count)
    }
}

/// Client-side filter over pending requests.
#[derive(Debug, Clone, Default)]
pub struct ApprovalFilter {
    pub search: String,
    pub priority: Option<Priority>,
    pub request_type: Option<RequestType>,
}

impl ApprovalFilter {
    fn matches(&self, request: &ApprovalRequest) -> bool {
        let text_hit = [
            request.requested_by.as_str(),
            request.requested_for.as_str(),
            request.action.as_str(),
            request.department.as_str(),
        ]
        .iter()
        .any(|field| contains_ignore_case(field, &self.search));
        text_hit
            && self.priority.map_or(true, |priority| request.priority == priority)
            && self
                .request_type
                .map_or(true, |kind| request.request_type == kind)
    }
}

/// Ordered list of pending authorization requests.
///
/// Arrival order is kept; approve and reject remove the request and move it
/// into the [`AuditLog`].
pub struct ApprovalQueue {
    prefix: String,
    pending: Vec<ApprovalRequest>,
    audit: AuditLog,
    observers: Vec<Box<dyn ApprovalCountObserver>>,
}

impl ApprovalQueue {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::from_requests(prefix, Vec::new())
    }

    /// Seeds the queue with already-pending requests, in the given order.
    pub fn from_requests(prefix: impl Into<String>, pending: Vec<ApprovalRequest>) -> Self {
        Self {
            prefix: prefix.into(),
            pending,
            audit: AuditLog::new(),
            observers: Vec::new(),
        }
    }

    /// Registers a count listener. It is invoked synchronously after every
    /// mutation that changes the count.
    pub fn subscribe(&mut self, observer: impl ApprovalCountObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> &[ApprovalRequest] {
        &self.pending
    }

    pub fn get(&self, id: &str) -> Option<&ApprovalRequest> {
        self.pending.iter().find(|request| request.id == id)
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    pub fn filter(&self, filter: &ApprovalFilter) -> Vec<&ApprovalRequest> {
        self.pending
            .iter()
            .filter(|request| filter.matches(request))
            .collect()
    }

    /// Appends a new pending request. The id sequence is `count + 1`,
    /// zero-padded to three digits; if that id is still pending or already
    /// decided the sequence moves up until it is free.
    pub fn submit(&mut self, input: ApprovalRequestInput) -> ApprovalRequest {
        let id = self.next_id();
        let request = ApprovalRequest {
            id,
            request_type: input.request_type,
            requested_by: input.requested_by,
            requested_for: input.requested_for,
            action: input.action,
            priority: input.priority,
            submitted_at: Utc::now(),
            department: input.department,
            details: input.details,
            status: RequestStatus::Pending,
        };
        tracing::info!(
            id = %request.id,
            kind = %request.request_type,
            requested_for = %request.requested_for,
            "approval request submitted"
        );
        self.pending.push(request.clone());
        self.notify_observers();
        request
    }

    pub fn approve(
        &mut self,
        id: &str,
        decided_by: &str,
        sink: &dyn NotificationSink,
    ) -> Option<ApprovalRequest> {
        self.decide(id, RequestStatus::Approved, decided_by, sink)
    }

    pub fn reject(
        &mut self,
        id: &str,
        decided_by: &str,
        sink: &dyn NotificationSink,
    ) -> Option<ApprovalRequest> {
        self.decide(id, RequestStatus::Rejected, decided_by, sink)
    }

    fn decide(
        &mut self,
        id: &str,
        status: RequestStatus,
        decided_by: &str,
        sink: &dyn NotificationSink,
    ) -> Option<ApprovalRequest> {
        let Some(index) = self.pending.iter().position(|request| request.id == id) else {
            tracing::debug!(id, "decision on unknown request ignored");
            return None;
        };
        let request = self.pending.remove(index);
        let verb = match status {
            RequestStatus::Approved => "approved",
            _ => "rejected",
        };
        tracing::info!(id, decided_by, "approval request {verb}");
        let message = format!("Request {verb}");
        let description = format!("{} for {}", request.action, request.requested_for);
        match status {
            RequestStatus::Approved => sink.success(&message, Some(NotifyOptions::described(description))),
            _ => sink.error(&message, Some(NotifyOptions::described(description))),
        }
        self.audit.record(request.clone(), status, decided_by);
        self.notify_observers();
        Some(request)
    }

    fn next_id(&self) -> String {
        let mut sequence = self.pending.len() + 1;
        loop {
            let candidate = format!("{}-{:03}", self.prefix, sequence);
            if self.get(&candidate).is_none() && !self.audit.contains(&candidate) {
                return candidate;
            }
            sequence += 1;
        }
    }

    fn notify_observers(&self) {
        let count = self.pending.len();
        for observer in &self.observers {
            observer.on_approvals_count_change(count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NoticeKind, RecordingNotifier};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn input(name: &str) -> ApprovalRequestInput {
        ApprovalRequestInput::new(RequestType::UserCreation, "Admin User", name, "Create user account")
            .with_department("Retail Banking")
    }

    #[test]
    fn ids_follow_length_plus_one() {
        let mut queue = ApprovalQueue::new("REQ");
        for name in ["A", "B", "C", "D", "E"] {
            queue.submit(input(name));
        }
        let sixth = queue.submit(input("F"));
        assert_eq!(sixth.id, "REQ-006");
        assert_eq!(sixth.status, RequestStatus::Pending);
        assert_eq!(queue.pending().last().unwrap().requested_for, "F");
    }

    #[test]
    fn colliding_sequence_moves_up() {
        let mut queue = ApprovalQueue::new("REQ");
        queue.submit(input("A"));
        queue.submit(input("B"));
        let sink = RecordingNotifier::new();
        queue.approve("REQ-001", "Admin User", &sink);
        let next = queue.submit(input("C"));
        assert_eq!(next.id, "REQ-003");
    }

    #[test]
    fn decided_ids_are_never_reissued() {
        let mut queue = ApprovalQueue::new("REQ");
        for name in ["A", "B", "C"] {
            queue.submit(input(name));
        }
        let sink = RecordingNotifier::new();
        queue.approve("REQ-003", "Dana", &sink);

        let next = queue.submit(input("D"));
        assert_eq!(next.id, "REQ-004");
        queue.reject(&next.id, "Dana", &sink);

        let ids: Vec<&str> = queue
            .audit_log()
            .entries()
            .iter()
            .map(|entry| entry.request.id.as_str())
            .collect();
        assert_eq!(ids, vec!["REQ-003", "REQ-004"]);
    }

    #[test]
    fn approve_and_reject_remove_and_audit() {
        let mut queue = ApprovalQueue::new("REQ");
        queue.submit(input("A"));
        queue.submit(input("B"));
        let sink = RecordingNotifier::new();

        assert!(queue.approve("REQ-001", "Dana", &sink).is_some());
        assert_eq!(queue.count(), 1);
        assert!(queue.reject("REQ-002", "Dana", &sink).is_some());
        assert_eq!(queue.count(), 0);

        let kinds: Vec<_> = sink.notices().iter().map(|notice| notice.kind).collect();
        assert_eq!(kinds, vec![NoticeKind::Success, NoticeKind::Error]);
        assert_eq!(queue.audit_log().len(), 2);
        assert_eq!(
            queue.audit_log().with_status(RequestStatus::Rejected).count(),
            1
        );
    }

    #[test]
    fn unknown_id_is_no_op() {
        let mut queue = ApprovalQueue::new("REQ");
        queue.submit(input("A"));
        let sink = RecordingNotifier::new();
        assert!(queue.reject("REQ-999", "Dana", &sink).is_none());
        assert_eq!(queue.count(), 1);
        assert!(sink.notices().is_empty());
        assert!(queue.audit_log().is_empty());
    }

    #[test]
    fn observers_see_every_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = Rc::clone(&seen);
        let mut queue = ApprovalQueue::new("REQ");
        queue.subscribe(move |count: usize| recorder.borrow_mut().push(count));

        queue.submit(input("A"));
        queue.submit(input("B"));
        let sink = RecordingNotifier::new();
        queue.approve("REQ-002", "Dana", &sink);
        queue.approve("REQ-002", "Dana", &sink);

        assert_eq!(*seen.borrow(), vec![1, 2, 1]);
    }

    #[test]
    fn filter_by_text_and_priority() {
        let mut queue = ApprovalQueue::new("REQ");
        queue.submit(input("Maria Lopez").with_priority(Priority::High));
        queue.submit(input("John Chen"));

        let by_name = ApprovalFilter {
            search: "maria".into(),
            ..ApprovalFilter::default()
        };
        assert_eq!(queue.filter(&by_name).len(), 1);

        let by_priority = ApprovalFilter {
            priority: Some(Priority::Medium),
            ..ApprovalFilter::default()
        };
        let hits = queue.filter(&by_priority);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].requested_for, "John Chen");
        assert_eq!(queue.filter(&ApprovalFilter::default()).len(), 2);
    }
}
