use super::*;

/// Tests paginating all users.
///
/// Verifies that the total counts every match while the page holds at most `limit`
/// users.
///
/// Expected: Ok with 2 users on page 1 and total 3
#[tokio::test]
async fn paginates_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::create_user(db).await?;
    }

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .get_paginated(UserFilter::default(), PageRequest::new(1, 2))
        .await?;

    assert_eq!(users.len(), 2);
    assert_eq!(total, 3);

    let (users, _) = repo
        .get_paginated(UserFilter::default(), PageRequest::new(2, 2))
        .await?;
    assert_eq!(users.len(), 1);

    Ok(())
}

/// Tests filtering users by role and search term.
///
/// Expected: Ok with only the matching business owner
#[tokio::test]
async fn filters_by_role_and_search() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("groomer@paws.test")
        .role("business_owner")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .email("walker@paws.test")
        .role("business_owner")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .email("groomer-fan@paws.test")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .get_paginated(
            UserFilter {
                role: Some(UserRole::BusinessOwner),
                is_active: None,
                search: Some("GROOMER".to_string()),
            },
            PageRequest::default(),
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(users[0].email, "groomer@paws.test");

    Ok(())
}
