mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::seeded_queue;
use rewards_console::{
    access::{RoleChange, RoleEditor, UserAccessForm},
    approvals::{ApprovalFilter, ApprovalRequestInput, Priority, RequestStatus, RequestType},
    data::{DataProvider, SeedData},
    notify::{NoticeKind, RecordingNotifier},
};

#[test]
fn approve_removes_exactly_one_and_notifies_count() {
    let mut queue = seeded_queue();
    let counts = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&counts);
    queue.subscribe(move |count: usize| seen.borrow_mut().push(count));
    let sink = RecordingNotifier::new();

    let approved = queue.approve("REQ-002", "Admin User", &sink).unwrap();

    assert_eq!(approved.id, "REQ-002");
    assert_eq!(queue.count(), 2);
    let ids: Vec<&str> = queue.pending().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["REQ-001", "REQ-003"]);
    assert_eq!(*counts.borrow(), vec![2]);
    assert_eq!(sink.last().unwrap().kind, NoticeKind::Success);

    let entry = &queue.audit_log().entries()[0];
    assert_eq!(entry.request.status, RequestStatus::Approved);
    assert_eq!(entry.decided_by, "Admin User");
}

#[test]
fn reject_uses_error_notice() {
    let mut queue = seeded_queue();
    let sink = RecordingNotifier::new();

    queue.reject("REQ-001", "Admin User", &sink).unwrap();

    let notice = sink.last().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "Request rejected");
    assert_eq!(queue.audit_log().with_status(RequestStatus::Rejected).count(), 1);
}

#[test]
fn unknown_id_is_a_silent_no_op() {
    let mut queue = seeded_queue();
    let counts = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&counts);
    queue.subscribe(move |count: usize| seen.borrow_mut().push(count));
    let sink = RecordingNotifier::new();

    assert!(queue.approve("REQ-999", "Admin User", &sink).is_none());
    assert_eq!(queue.count(), 3);
    assert!(sink.notices().is_empty());
    assert!(counts.borrow().is_empty());
    assert!(queue.audit_log().is_empty());
}

#[test]
fn submitted_ids_stay_unique_after_decisions() {
    let mut queue = seeded_queue();
    let sink = RecordingNotifier::new();
    queue.approve("REQ-001", "Admin User", &sink);

    let request = queue.submit(ApprovalRequestInput::new(
        RequestType::AccessRequest,
        "Admin User",
        "Nina Patel",
        "Grant reports.view",
    ));

    assert_ne!(request.id, "REQ-003");
    assert_eq!(request.id, "REQ-004");
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(queue.pending().last().unwrap().id, "REQ-004");
}

#[test]
fn filters_narrow_the_pending_list() {
    let queue = seeded_queue();
    let urgent = ApprovalFilter {
        priority: Some(Priority::Urgent),
        ..ApprovalFilter::default()
    };
    assert_eq!(queue.filter(&urgent).len(), 1);

    let marketing = ApprovalFilter {
        search: "marketing".into(),
        ..ApprovalFilter::default()
    };
    assert_eq!(queue.filter(&marketing)[0].id, "REQ-002");
    assert_eq!(queue.filter(&ApprovalFilter::default()).len(), 3);
}

#[test]
fn user_access_form_queues_request() {
    let mut queue = seeded_queue();
    let mut form = UserAccessForm::new();
    form.set_field("name", "Omar Haddad");
    form.set_field("email", "omar.haddad@bank.example");
    form.set_field("role", "Viewer");
    form.set_field("department", "Finance");
    form.set_field("priority", "high");
    let sink = RecordingNotifier::new();

    let request = form.submit(&mut queue, "Admin User", &sink).unwrap();

    assert_eq!(request.id, "REQ-004");
    assert_eq!(request.request_type, RequestType::UserCreation);
    assert_eq!(request.priority, Priority::High);
    assert_eq!(request.action, "Create Viewer account");
    assert_eq!(queue.count(), 4);
    assert!(form.fields().is_empty());
}

#[test]
fn invalid_user_access_form_keeps_input() {
    let mut queue = seeded_queue();
    let mut form = UserAccessForm::new();
    form.set_field("name", "Omar Haddad");
    form.set_field("email", "not-an-email");
    form.set_field("role", "Viewer");
    form.set_field("department", "Finance");
    let sink = RecordingNotifier::new();

    assert!(form.submit(&mut queue, "Admin User", &sink).is_none());
    assert_eq!(queue.count(), 3);
    assert_eq!(sink.last().unwrap().kind, NoticeKind::Error);
    assert_eq!(form.fields().text("email"), Some("not-an-email"));
}

#[test]
fn role_change_request_targets_known_role() {
    let mut queue = seeded_queue();
    let editor = RoleEditor::new(SeedData.roles());

    let request = editor
        .request_role_change(
            &mut queue,
            RoleChange {
                requested_by: "Admin User",
                user: "Emily Watson",
                from_role: Some("Viewer"),
                to_role: "campaign manager",
                department: "Marketing",
                reason: "Owns the Q4 calendar",
                priority: Priority::Medium,
            },
        )
        .unwrap();
    assert_eq!(request.action, "Change role from Viewer to Campaign Manager");
    assert_eq!(request.request_type, RequestType::RoleChange);

    let missing = editor.request_role_change(
        &mut queue,
        RoleChange {
            requested_by: "Admin User",
            user: "Emily Watson",
            from_role: None,
            to_role: "Astronaut",
            department: "Marketing",
            reason: "",
            priority: Priority::Low,
        },
    );
    assert!(missing.is_err());
    assert_eq!(queue.count(), 4);
}
