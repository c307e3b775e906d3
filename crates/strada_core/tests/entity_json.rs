use serde_json::json;
use strada_core::{Employment, User};

#[test]
fn user_body_without_ids_maps_to_unsaved_user() {
    let body = json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@x.com",
        "employments": [
            { "company": "Acme", "monthsOfExperience": 14, "salary": 5200, "startDate": 1000 }
        ]
    });

    let user: User = serde_json::from_value(body).unwrap();
    assert_eq!(user.id, 0);
    assert_eq!(user.address, None);
    assert_eq!(user.employments.len(), 1);

    let employment = &user.employments[0];
    assert_eq!(employment.id, 0);
    assert_eq!(employment.user_id, 0);
    assert_eq!(employment.months_of_experience, 14);
    assert_eq!(employment.start_date, Some(1000));
    assert_eq!(employment.end_date, None);
}

#[test]
fn employment_serializes_with_camel_case_names() {
    let mut employment = Employment::new(3, "Acme", 1000);
    employment.id = 9;
    employment.end_date = Some(2000);

    let value = serde_json::to_value(&employment).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 9,
            "userId": 3,
            "company": "Acme",
            "monthsOfExperience": 0,
            "salary": 0,
            "startDate": 1000,
            "endDate": 2000
        })
    );
}
