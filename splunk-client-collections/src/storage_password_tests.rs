/// Tests for storage passwords and their collection
#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use super::super::*;
    use crate::transport::MockTransport;
    use splunk_client_core::{Feed, MessageKind};

    fn stored(username: &str, realm: Option<&str>) -> Resource {
        StoragePassword {
            name: StoragePassword::resource_name(username, realm),
            username: username.to_string(),
            realm: realm.map(str::to_string),
            clear_password: Some("s3cret".to_string()),
            encrypted_password: Some("$7$abc".to_string()),
            password: Some("********".to_string()),
        }
        .to_resource()
    }

    fn passwords(transport: MockTransport) -> StoragePasswordCollection {
        StoragePasswordCollection::new(Arc::new(transport), Namespace::new("nobody", "search"))
    }

    fn argument_set(arguments: &[Argument]) -> ArgumentSet {
        arguments.iter().cloned().collect()
    }

    #[test]
    fn test_resource_name_escapes_colons() {
        assert_eq!(StoragePassword::resource_name("admin", None), ":admin:");
        assert_eq!(StoragePassword::resource_name("admin", Some("")), ":admin:");
        assert_eq!(
            StoragePassword::resource_name("admin", Some("github")),
            "github:admin:"
        );
        assert_eq!(
            StoragePassword::resource_name("a:b", Some("c:d")),
            "c\\:d:a\\:b:"
        );
    }

    #[test]
    fn test_resource_mapping() {
        let resource = stored("admin", Some("github"));
        assert_eq!(resource.title, "github:admin:");
        assert_eq!(resource.content_str("encr_password"), Some("$7$abc"));

        let password = StoragePassword::from_resource(resource.clone()).unwrap();
        assert_eq!(password.name(), "github:admin:");
        assert_eq!(password.username, "admin");
        assert_eq!(password.realm.as_deref(), Some("github"));
        assert_eq!(password.clear_password.as_deref(), Some("s3cret"));
        assert_eq!(password.to_resource(), resource);
    }

    #[test]
    fn test_resource_without_username_fails_conversion() {
        let resource = Resource::new("storage/passwords/x", "x").with_content("realm", "");
        let err = StoragePassword::from_resource(resource).unwrap_err();
        assert!(err.is_conversion());
    }

    #[test]
    fn test_empty_realm_reads_as_none() {
        let resource = Resource::new("storage/passwords/:admin:", ":admin:")
            .with_content("username", "admin")
            .with_content("realm", "");
        let password = StoragePassword::from_resource(resource).unwrap();
        assert_eq!(password.realm, None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let password = StoragePassword::from_resource(stored("admin", None)).unwrap();
        let debug = format!("{:?}", password);
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("$7$abc"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_filter_defaults_and_arguments() {
        let filter = Filter::default();
        assert_eq!(filter.count, 30);
        assert!(filter.validate().is_ok());

        let arguments = filter
            .clone()
            .offset(60)
            .search("realm=github")
            .sort("realm", SortDirection::Descending)
            .sort_mode(SortMode::CaseSensitive)
            .to_arguments();

        assert_eq!(
            arguments,
            argument_set(&[
                Argument::new("count", 30),
                Argument::new("offset", 60),
                Argument::new("search", "realm=github"),
                Argument::new("sort_dir", "desc"),
                Argument::new("sort_key", "realm"),
                Argument::new("sort_mode", "alpha_case"),
            ])
        );
        assert!(!filter.to_arguments().iter().any(|argument| argument.name == "search"));
    }

    #[test]
    fn test_filter_validation() {
        let err = Filter::default().sort("", SortDirection::Ascending).validate().unwrap_err();
        assert!(err.is_invalid_argument());

        let err = Filter::default().search("   ").validate().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_filter_uses_configured_page_size() {
        let collection = passwords(MockTransport::new()).with_page_size(100);
        assert_eq!(collection.filter().count, 100);
        assert_eq!(passwords(MockTransport::new()).filter(), Filter::default());
    }

    #[test]
    fn test_create_without_password_fails_before_any_request() {
        let mut transport = MockTransport::new();
        transport.expect_create().never();
        let collection = passwords(transport);

        let err = collection
            .create("", "user", None)
            .err()
            .expect("empty password must be rejected");
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("password"));

        let err = collection
            .create("s3cret", "", Some("github"))
            .err()
            .expect("empty username must be rejected");
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_read_and_write_preconditions_checked_synchronously() {
        let mut transport = MockTransport::new();
        transport.expect_get().never();
        transport.expect_update().never();
        transport.expect_remove().never();
        transport.expect_list().never();
        let mut collection = passwords(transport);

        assert!(collection.get("", None).err().unwrap().is_invalid_argument());
        assert!(collection.get_or_none("", None).err().unwrap().is_invalid_argument());
        assert!(collection.update("", None, "new").err().unwrap().is_invalid_argument());
        assert!(collection.update("admin", None, "").err().unwrap().is_invalid_argument());
        assert!(collection.remove("", None).err().unwrap().is_invalid_argument());

        let invalid = Filter::default().sort(" ", SortDirection::Ascending);
        assert!(collection.get_slice(&invalid).err().unwrap().is_invalid_argument());
        assert_eq!(collection.state(), CollectionState::Unloaded);
    }

    #[tokio::test]
    async fn test_create_posts_arguments_and_materializes_entity() {
        let mut transport = MockTransport::new();
        transport
            .expect_create()
            .withf(|endpoint, arguments| {
                endpoint.path == "storage/passwords"
                    && argument_set(arguments)
                        == argument_set(&[
                            Argument::new("name", "admin"),
                            Argument::new("password", "s3cret"),
                            Argument::new("realm", "github"),
                        ])
            })
            .times(1)
            .returning(|_, _| Ok(Feed::from_entries(vec![stored("admin", Some("github"))])));

        let collection = passwords(transport);
        let created = collection
            .create("s3cret", "admin", Some("github"))
            .unwrap()
            .await
            .unwrap();

        assert_eq!(created.name, "github:admin:");
        assert_eq!(created.clear_password.as_deref(), Some("s3cret"));
        // Creating does not alter the in-memory sequence
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn test_create_without_realm_omits_realm_argument() {
        let mut transport = MockTransport::new();
        transport
            .expect_create()
            .withf(|_, arguments| !arguments.iter().any(|argument| argument.name == "realm"))
            .times(1)
            .returning(|_, _| Ok(Feed::from_entries(vec![stored("admin", None)])));

        let collection = passwords(transport);
        let created = collection.create("s3cret", "admin", Some("")).unwrap().await.unwrap();
        assert_eq!(created.realm, None);
    }

    #[tokio::test]
    async fn test_create_conflict_is_remote_operation_error() {
        let mut transport = MockTransport::new();
        transport.expect_create().times(1).returning(|_, _| {
            Err(Error::remote(
                409,
                "Conflict",
                vec![Message::new(MessageKind::Error, "An object with name=:admin: already exists")],
            ))
        });

        let collection = passwords(transport);
        let err = collection.create("s3cret", "admin", None).unwrap().await.unwrap_err();

        match err {
            Error::RemoteOperation { status, messages, .. } => {
                assert_eq!(status, 409);
                assert_eq!(messages.len(), 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_versus_get_or_none_on_missing_entity() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|_, name| name == "github:ghost:")
            .times(2)
            .returning(|_, _| Err(Error::remote(404, "Not Found", Vec::new())));

        let collection = passwords(transport);

        let absent = collection
            .get_or_none("ghost", Some("github"))
            .unwrap()
            .await
            .unwrap();
        assert!(absent.is_none());

        let err = collection.get("ghost", Some("github")).unwrap().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_returns_materialized_entity() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|_, name| name == ":admin:")
            .times(2)
            .returning(|_, _| Ok(Feed::from_entries(vec![stored("admin", None)])));

        let collection = passwords(transport);

        let password = collection.get("admin", None).unwrap().await.unwrap();
        assert_eq!(password.username, "admin");

        let password = collection.get_or_none("admin", None).unwrap().await.unwrap();
        assert_eq!(password.map(|password| password.name), Some(":admin:".to_string()));
    }

    #[tokio::test]
    async fn test_get_slice_replaces_contents_and_pagination() {
        let mut transport = MockTransport::new();
        transport
            .expect_list()
            .withf(|_, arguments| {
                argument_set(arguments).contains(&Argument::new("offset", 1))
                    && argument_set(arguments).contains(&Argument::new("count", 1))
            })
            .times(1)
            .returning(|_, _| {
                Ok(Feed::from_entries(vec![stored("second", None)])
                    .with_pagination(Pagination::new(1, 1, 3)))
            });

        let mut collection = passwords(transport);
        let filter = collection.filter().count(1).offset(1);
        collection.get_slice(&filter).unwrap().await.unwrap();

        assert_eq!(collection.state(), CollectionState::Loaded);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].username, "second");
        assert_eq!(collection.pagination(), &Pagination::new(1, 1, 3));
        assert!(collection.pagination().has_more());
    }

    #[tokio::test]
    async fn test_get_slice_with_prefixed_argument_set() {
        let mut transport = MockTransport::new();
        transport
            .expect_list()
            .withf(|endpoint, arguments| {
                endpoint.path == "storage/passwords"
                    && argument_set(arguments)
                        == argument_set(&[
                            Argument::new("f.realm", "github"),
                            Argument::new("f.username", "admin"),
                        ])
            })
            .times(1)
            .returning(|_, _| {
                Ok(Feed::from_entries(vec![stored("admin", Some("github"))])
                    .with_pagination(Pagination::new(10, 0, 1)))
            });

        let mut criteria = ArgumentSet::with_prefix("f.");
        criteria.insert(Argument::new("realm", "github"));
        criteria.insert(Argument::new("username", "admin"));

        let mut collection = passwords(transport);
        collection.get_slice_with(&criteria).await.unwrap();

        assert_eq!(collection.state(), CollectionState::Loaded);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].name, "github:admin:");
        assert_eq!(collection.pagination(), &Pagination::new(10, 0, 1));
        assert!(criteria.contains(&Argument::new("realm", "github")));
    }

    #[tokio::test]
    async fn test_get_by_name_uses_server_entity_name() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|_, name| name == "github:admin:")
            .times(1)
            .returning(|_, _| Ok(Feed::from_entries(vec![stored("admin", Some("github"))])));
        transport
            .expect_get()
            .withf(|_, name| name == ":ghost:")
            .times(2)
            .returning(|_, _| Err(Error::remote(404, "Not Found", Vec::new())));

        let collection = passwords(transport);
        assert!(collection.get_by_name("").err().unwrap().is_invalid_argument());

        let password = collection.get_by_name("github:admin:").unwrap().await.unwrap();
        assert_eq!(password.username, "admin");

        let absent = collection.get_by_name_or_none(":ghost:").unwrap().await.unwrap();
        assert!(absent.is_none());

        let err = collection.get_by_name(":ghost:").unwrap().await.unwrap_err();
        assert!(err.is_not_found());
        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn test_failed_slice_leaves_count_and_pagination_unchanged() {
        let mut calls = 0;
        let mut transport = MockTransport::new();
        transport.expect_list().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Ok(Feed::from_entries(vec![stored("a", None), stored("b", None)]))
            } else {
                Err(Error::remote(500, "Internal Server Error", Vec::new()))
            }
        });

        let mut collection = passwords(transport);
        collection.get_all().await.unwrap();
        let pagination = *collection.pagination();

        let filter = collection.filter().search("username=a");
        let err = collection.get_slice(&filter).unwrap().await.unwrap_err();

        assert!(matches!(err, Error::RemoteOperation { status: 500, .. }));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.pagination(), &pagination);
        assert_eq!(collection.state(), CollectionState::Loaded);
    }

    #[tokio::test]
    async fn test_reload_discards_slice_narrowing() {
        let mut transport = MockTransport::new();
        transport
            .expect_list()
            .withf(|_, arguments| arguments.contains(&Argument::new("offset", 0)))
            .times(1)
            .returning(|_, _| Ok(Feed::from_entries(vec![stored("a", None)])));
        transport
            .expect_list()
            .withf(|_, arguments| arguments == &vec![Argument::new("count", 0)])
            .times(1)
            .returning(|_, _| {
                Ok(Feed::from_entries(vec![
                    stored("a", None),
                    stored("b", None),
                    stored("c", None),
                ]))
            });

        let mut collection = passwords(transport);
        let filter = collection.filter().count(1);
        collection.get_slice(&filter).unwrap().await.unwrap();
        assert_eq!(collection.len(), 1);

        collection.reload().await.unwrap();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.pagination().total_results, 3);
        let names: Vec<&str> = collection.iter().map(|password| password.username.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let mut transport = MockTransport::new();
        transport
            .expect_update()
            .withf(|_, name, arguments| {
                name == "github:admin:" && arguments == &vec![Argument::new("password", "rotated")]
            })
            .times(1)
            .returning(|_, _, _| Ok(Feed::from_entries(vec![stored("admin", Some("github"))])));
        transport
            .expect_remove()
            .withf(|_, name| name == "github:admin:")
            .times(1)
            .returning(|_, _| Ok(()));
        transport
            .expect_remove()
            .withf(|_, name| name == ":ghost:")
            .times(1)
            .returning(|_, _| Err(Error::remote(404, "Not Found", Vec::new())));

        let collection = passwords(transport);

        let updated = collection
            .update("admin", Some("github"), "rotated")
            .unwrap()
            .await
            .unwrap();
        assert_eq!(updated.username, "admin");

        collection.remove("admin", Some("github")).unwrap().await.unwrap();

        let err = collection.remove("ghost", None).unwrap().await.unwrap_err();
        assert!(err.is_not_found());
    }
}
