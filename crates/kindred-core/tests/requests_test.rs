use chrono::NaiveDate;
use kindred_core::{Error, Member, MemberId, MemberPatch, NewMember, NewRelationship, RelationshipKind};

fn new_member(json: &str) -> NewMember {
    serde_json::from_str(json).unwrap()
}

fn patch(json: &str) -> MemberPatch {
    serde_json::from_str(json).unwrap()
}

#[test]
fn new_member_requires_first_and_last_name() {
    let err = new_member(r#"{"lastName":"Doe"}"#).validate().unwrap_err();
    assert_eq!(err.to_string(), "firstName and lastName are required");

    let err = new_member(r#"{"firstName":"   ","lastName":"Doe"}"#)
        .validate()
        .unwrap_err();
    assert!(matches!(err, Error::MissingField { .. }));
}

#[test]
fn new_member_parses_optional_fields() {
    let draft = new_member(
        r#"{"firstName":"Jane","lastName":"Doe","birthDate":"1960-05-01","deathDate":"","photoUrl":"/uploads/a.png","bio":""}"#,
    )
    .validate()
    .unwrap();
    assert_eq!(draft.first_name, "Jane");
    assert_eq!(draft.birth_date, NaiveDate::from_ymd_opt(1960, 5, 1));
    assert_eq!(draft.death_date, None);
    assert_eq!(draft.photo_url.as_deref(), Some("/uploads/a.png"));
    assert_eq!(draft.bio, None);

    let member = draft.into_member(MemberId::from("m1"));
    assert_eq!(member.id.as_str(), "m1");
    assert_eq!(member.created_at, member.updated_at);
}

#[test]
fn new_member_rejects_malformed_dates() {
    let err = new_member(r#"{"firstName":"Jane","lastName":"Doe","birthDate":"01/05/1960"}"#)
        .validate()
        .unwrap_err();
    assert!(matches!(err, Error::InvalidDate { field: "birthDate", .. }));
}

#[test]
fn member_patch_keeps_absent_fields_and_clears_nulls() {
    let mut m = Member::new("m1", "John", "Doe");
    m.birth_date = NaiveDate::from_ymd_opt(1940, 1, 1);
    m.bio = Some("Sailor".to_string());
    m.photo_url = Some("/uploads/x.jpg".to_string());

    patch(r#"{"firstName":"Johnny","bio":null}"#).apply(&mut m).unwrap();
    assert_eq!(m.first_name, "Johnny");
    assert_eq!(m.last_name, "Doe");
    assert_eq!(m.birth_date, NaiveDate::from_ymd_opt(1940, 1, 1));
    assert_eq!(m.bio, None);
    assert_eq!(m.photo_url.as_deref(), Some("/uploads/x.jpg"));

    patch(r#"{"lastName":null,"birthDate":null,"deathDate":"2001-09-30"}"#)
        .apply(&mut m)
        .unwrap();
    assert_eq!(m.last_name, "Doe");
    assert_eq!(m.birth_date, None);
    assert_eq!(m.death_date, NaiveDate::from_ymd_opt(2001, 9, 30));
}

#[test]
fn member_patch_is_atomic_on_error() {
    let mut m = Member::new("m1", "John", "Doe");
    let before = m.clone();

    let err = patch(r#"{"firstName":"Jack","lastName":""}"#)
        .apply(&mut m)
        .unwrap_err();
    assert_eq!(err, Error::BlankField { field: "lastName" });
    assert_eq!(m, before);

    let err = patch(r#"{"firstName":"Jack","deathDate":"soon"}"#)
        .apply(&mut m)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidDate { field: "deathDate", .. }));
    assert_eq!(m, before);
}

#[test]
fn new_relationship_validates_required_fields_and_type() {
    let missing: NewRelationship = serde_json::from_str(r#"{"memberId":"1","type":"SPOUSE"}"#).unwrap();
    assert_eq!(
        missing.validate().unwrap_err().to_string(),
        "memberId, relatedMemberId, and type are required"
    );

    let invalid: NewRelationship =
        serde_json::from_str(r#"{"memberId":"1","relatedMemberId":"2","type":"INVALID"}"#).unwrap();
    assert_eq!(
        invalid.validate().unwrap_err().to_string(),
        "type must be PARENT_CHILD or SPOUSE"
    );

    let selfish: NewRelationship =
        serde_json::from_str(r#"{"memberId":"1","relatedMemberId":"1","type":"SPOUSE"}"#).unwrap();
    assert_eq!(selfish.validate().unwrap_err(), Error::SelfRelationship);

    let ok: NewRelationship =
        serde_json::from_str(r#"{"memberId":"1","relatedMemberId":"2","type":"PARENT_CHILD"}"#)
            .unwrap();
    let draft = ok.validate().unwrap();
    assert_eq!(draft.kind, RelationshipKind::ParentChild);
    assert_eq!(draft.source.as_str(), "1");
    assert_eq!(draft.target.as_str(), "2");
}
