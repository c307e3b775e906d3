use strada_core::{
    Employment, EmploymentService, EmploymentStore, RepoError, SharedDb, User, UserService,
    UserStore,
};

fn services() -> (
    UserService<UserStore, EmploymentStore>,
    EmploymentService<EmploymentStore>,
) {
    let db = SharedDb::in_memory().unwrap();
    let employments = EmploymentStore::new(db.clone());
    (
        UserService::new(UserStore::new(db), employments.clone()),
        EmploymentService::new(employments),
    )
}

#[test]
fn user_create_then_get_returns_created_copy() {
    let (users, _) = services();
    let created = users
        .create(&User::new("Ada", "Lovelace", "a@x.com"))
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(users.get(created.id).unwrap(), Some(created.clone()));
    assert_eq!(users.get_all().unwrap(), vec![created]);
}

#[test]
fn user_update_reports_missing_target_with_false() {
    let (users, _) = services();
    assert!(!users
        .update(3, &User::new("Ada", "Lovelace", "a@x.com"))
        .unwrap());
    assert!(users.get_all().unwrap().is_empty());
}

#[test]
fn user_update_overwrites_fields_in_place() {
    let (users, _) = services();
    let created = users
        .create(&User::new("Ada", "Lovelace", "a@x.com"))
        .unwrap();

    assert!(users
        .update(created.id, &User::new("Ada", "King", "ada.king@x.com"))
        .unwrap());

    let loaded = users.get(created.id).unwrap().unwrap();
    assert_eq!(loaded.last_name, "King");
    assert_eq!(loaded.email, "ada.king@x.com");
}

#[test]
fn user_delete_of_missing_id_is_noop() {
    let (users, _) = services();
    let created = users
        .create(&User::new("Ada", "Lovelace", "a@x.com"))
        .unwrap();
    users.delete(99).unwrap();
    assert_eq!(users.get_all().unwrap(), vec![created]);
}

#[test]
fn user_service_create_is_a_pass_through_without_prechecks() {
    let (users, _) = services();
    let invalid = User::new("", "", "not-an-email");
    assert!(users.create(&invalid).is_ok());
}

#[test]
fn user_service_exposes_employment_validation_and_lookup() {
    let (users, employments) = services();
    let owner = users
        .create(&User::new("Ada", "Lovelace", "a@x.com"))
        .unwrap();
    let created = employments
        .create(&Employment::new(owner.id, "Analytical", 1_000))
        .unwrap();

    assert!(users.employments_are_valid(&[created.clone()]).is_valid());
    assert!(!users
        .employments_are_valid(&[Employment::new(0, "Analytical", 1_000)])
        .is_valid());
    assert_eq!(users.employments_of(owner.id).unwrap(), vec![created]);
}

#[test]
fn employment_lifecycle_create_update_delete() {
    let (users, employments) = services();
    let owner = users
        .create(&User::new("Ada", "Lovelace", "a@x.com"))
        .unwrap();
    let created = employments
        .create(&Employment::new(owner.id, "Analytical", 1_000))
        .unwrap();
    assert_eq!(employments.get(created.id).unwrap(), Some(created.clone()));

    let mut changed = created.clone();
    changed.salary = 9_000;
    changed.end_date = Some(2_000);
    assert!(employments.update(created.id, &changed).unwrap());
    assert_eq!(employments.get(created.id).unwrap(), Some(changed));

    employments.delete(created.id).unwrap();
    employments.delete(created.id).unwrap();
    assert!(employments.get(created.id).unwrap().is_none());
    assert!(employments.list_for_user(owner.id).unwrap().is_empty());
}

#[test]
fn employment_update_of_missing_id_returns_false() {
    let (users, employments) = services();
    let owner = users
        .create(&User::new("Ada", "Lovelace", "a@x.com"))
        .unwrap();
    assert!(!employments
        .update(5, &Employment::new(owner.id, "Analytical", 1_000))
        .unwrap());
}

#[test]
fn employment_service_does_not_recheck_references_but_storage_does() {
    let (_, employments) = services();
    let err = employments
        .create(&Employment::new(999, "Nowhere", 1_000))
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidReference(_)));
}
