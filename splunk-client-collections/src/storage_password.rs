//! Stored credentials (`storage/passwords`)
//!
//! A storage password is identified by a username and an optional realm. The
//! server names the entity `realm:username:`, with any `:` inside either part
//! escaped as `\:`.
//!
//! # Examples
//!
//! ```rust,no_run
//! # async fn example(
//! #     mut passwords: splunk_client_collections::StoragePasswordCollection,
//! # ) -> splunk_client_collections::Result<()> {
//! let created = passwords.create("s3cret", "svc-account", Some("github"))?.await?;
//! assert_eq!(created.username, "svc-account");
//!
//! let filter = passwords.filter().search("realm=github");
//! passwords.get_slice(&filter)?.await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use splunk_client_core::{Argument, ArgumentSet, Message, Namespace, Pagination, Resource};
use std::fmt;
use std::future::Future;
use std::ops::Index;
use std::sync::Arc;
use tracing::info;

use crate::collection::{CollectionState, EntityCollection, Paginated};
use crate::entity::Entity;
use crate::transport::Transport;
use crate::{Error, Result};

/// Credentials stored on the server for a username and optional realm
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct StoragePassword {
    pub name: String,
    pub username: String,
    pub realm: Option<String>,
    pub clear_password: Option<String>,
    pub encrypted_password: Option<String>,
    /// Masked form returned by the server
    pub password: Option<String>,
}

impl StoragePassword {
    /// Entity name the server assigns to `username` within `realm`
    pub fn resource_name(username: &str, realm: Option<&str>) -> String {
        format!(
            "{}:{}:",
            escape_name_part(realm.unwrap_or_default()),
            escape_name_part(username)
        )
    }
}

fn escape_name_part(part: &str) -> String {
    part.replace(':', "\\:")
}

fn normalize_realm(realm: Option<&str>) -> Option<String> {
    realm.filter(|realm| !realm.is_empty()).map(str::to_string)
}

impl Entity for StoragePassword {
    const COLLECTION: &'static str = "storage/passwords";
    const KIND: &'static str = "StoragePassword";

    fn from_resource(resource: Resource) -> splunk_client_core::Result<Self> {
        let username = resource.require_str(Self::KIND, "username")?.to_string();
        let realm = normalize_realm(resource.content_str("realm"));
        let clear_password = resource.content_str("clear_password").map(str::to_string);
        let encrypted_password = resource.content_str("encr_password").map(str::to_string);
        let password = resource.content_str("password").map(str::to_string);

        Ok(Self {
            name: resource.title,
            username,
            realm,
            clear_password,
            encrypted_password,
            password,
        })
    }

    fn to_resource(&self) -> Resource {
        let mut resource = Resource::new(
            format!("{}/{}", Self::COLLECTION, self.name),
            self.name.clone(),
        )
        .with_content("username", self.username.clone());

        let optional = [
            ("realm", &self.realm),
            ("clear_password", &self.clear_password),
            ("encr_password", &self.encrypted_password),
            ("password", &self.password),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                resource = resource.with_content(key, value.clone());
            }
        }
        resource
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for StoragePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("StoragePassword")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("realm", &self.realm)
            .field("clear_password", &redacted(&self.clear_password))
            .field("encrypted_password", &redacted(&self.encrypted_password))
            .field("password", &self.password)
            .finish()
    }
}

/// Sort direction of a slice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// How sort keys are compared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    /// Numeric when every value is a number, alphabetic otherwise
    #[default]
    Automatic,
    Alphabetic,
    CaseSensitive,
    Numeric,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Automatic => "auto",
            SortMode::Alphabetic => "alpha",
            SortMode::CaseSensitive => "alpha_case",
            SortMode::Numeric => "num",
        }
    }
}

/// Criteria selecting a slice of storage passwords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Maximum number of entries to return; zero returns all of them
    pub count: u32,
    pub offset: u32,
    pub search: Option<String>,
    pub sort_direction: SortDirection,
    pub sort_key: String,
    pub sort_mode: SortMode,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            count: splunk_client_core::config::DEFAULT_PAGE_SIZE,
            offset: 0,
            search: None,
            sort_direction: SortDirection::Ascending,
            sort_key: "username".to_string(),
            sort_mode: SortMode::Automatic,
        }
    }
}

impl Filter {
    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort<S: Into<String>>(mut self, key: S, direction: SortDirection) -> Self {
        self.sort_key = key.into();
        self.sort_direction = direction;
        self
    }

    pub fn sort_mode(mut self, mode: SortMode) -> Self {
        self.sort_mode = mode;
        self
    }

    /// Reject criteria the server cannot evaluate
    pub fn validate(&self) -> splunk_client_core::Result<()> {
        if self.sort_key.trim().is_empty() {
            return Err(splunk_client_core::Error::invalid_argument(
                "criteria",
                "Sort key cannot be empty",
            ));
        }
        if matches!(&self.search, Some(search) if search.trim().is_empty()) {
            return Err(splunk_client_core::Error::invalid_argument(
                "criteria",
                "Search expression cannot be blank",
            ));
        }
        Ok(())
    }

    /// Request arguments for these criteria
    pub fn to_arguments(&self) -> ArgumentSet {
        let mut arguments: ArgumentSet = [
            Argument::new("count", self.count),
            Argument::new("offset", self.offset),
            Argument::new("sort_dir", self.sort_direction.as_str()),
            Argument::new("sort_key", &self.sort_key),
            Argument::new("sort_mode", self.sort_mode.as_str()),
        ]
        .into_iter()
        .collect();

        if let Some(search) = &self.search {
            arguments.insert(Argument::new("search", search));
        }
        arguments
    }
}

/// The `storage/passwords` collection
pub struct StoragePasswordCollection {
    inner: EntityCollection<StoragePassword>,
    page_size: u32,
}

impl StoragePasswordCollection {
    /// Create an unloaded collection scoped to `namespace`
    pub fn new(transport: Arc<dyn Transport>, namespace: Namespace) -> Self {
        Self {
            inner: EntityCollection::new(transport, namespace),
            page_size: splunk_client_core::config::DEFAULT_PAGE_SIZE,
        }
    }

    /// Use `page_size` as the default count of [`filter`](Self::filter)
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Default slice criteria for this collection
    pub fn filter(&self) -> Filter {
        Filter::default().count(self.page_size)
    }

    /// The underlying generic collection
    pub fn entities(&self) -> &EntityCollection<StoragePassword> {
        &self.inner
    }

    pub fn state(&self) -> CollectionState {
        self.inner.state()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StoragePassword> {
        self.inner.iter()
    }

    /// Store `password` for `username` within `realm`.
    ///
    /// An empty password or username is refused with
    /// [`Error::InvalidArgument`] before any request is made.
    pub fn create(
        &self,
        password: &str,
        username: &str,
        realm: Option<&str>,
    ) -> Result<impl Future<Output = Result<StoragePassword>> + Send + '_> {
        require_password(password)?;
        require_username(username)?;

        let mut arguments = ArgumentSet::new();
        arguments.insert(Argument::new("name", username));
        arguments.insert(Argument::new("password", password));
        if let Some(realm) = normalize_realm(realm) {
            arguments.insert(Argument::new("realm", realm));
        }

        Ok(async move {
            let created = self.inner.create_entity(arguments.to_arguments()).await?;
            info!("Created storage password {}", created.name);
            Ok(created)
        })
    }

    /// Fetch the credentials of `username` within `realm`, failing with
    /// [`Error::NotFound`] when none are stored
    pub fn get(
        &self,
        username: &str,
        realm: Option<&str>,
    ) -> Result<impl Future<Output = Result<StoragePassword>> + Send + '_> {
        require_username(username)?;
        let name = StoragePassword::resource_name(username, realm);
        self.inner.get_by_name(&name)
    }

    /// Fetch the credentials of `username` within `realm`, resolving to
    /// `None` when none are stored
    pub fn get_or_none(
        &self,
        username: &str,
        realm: Option<&str>,
    ) -> Result<impl Future<Output = Result<Option<StoragePassword>>> + Send + '_> {
        require_username(username)?;
        let name = StoragePassword::resource_name(username, realm);
        self.inner.get_by_name_or_none(&name)
    }

    /// Replace the in-memory contents with the slice selected by `criteria`
    pub fn get_slice(
        &mut self,
        criteria: &Filter,
    ) -> Result<impl Future<Output = Result<()>> + Send + '_> {
        criteria.validate()?;
        let arguments = criteria.to_arguments();
        Ok(async move { self.inner.get_slice_with(&arguments).await })
    }

    /// Replace the in-memory contents with the slice selected by raw request
    /// `arguments`, rendered with their set's prefix
    pub async fn get_slice_with(&mut self, arguments: &ArgumentSet) -> Result<()> {
        self.inner.get_slice_with(arguments).await
    }

    /// Fetch the credentials stored under the server-side entity `name`
    /// (`realm:username:`)
    pub fn get_by_name(
        &self,
        name: &str,
    ) -> Result<impl Future<Output = Result<StoragePassword>> + Send + '_> {
        self.inner.get_by_name(name)
    }

    /// Like [`get_by_name`](Self::get_by_name), resolving to `None` when the
    /// entity does not exist
    pub fn get_by_name_or_none(
        &self,
        name: &str,
    ) -> Result<impl Future<Output = Result<Option<StoragePassword>>> + Send + '_> {
        self.inner.get_by_name_or_none(name)
    }

    /// Replace the stored password of `username` within `realm`; an empty
    /// password is refused like in [`create`](Self::create)
    pub fn update(
        &self,
        username: &str,
        realm: Option<&str>,
        password: &str,
    ) -> Result<impl Future<Output = Result<StoragePassword>> + Send + '_> {
        require_username(username)?;
        require_password(password)?;

        let name = StoragePassword::resource_name(username, realm);
        let arguments = vec![Argument::new("password", password)];
        Ok(async move { self.inner.update_entity(&name, arguments).await })
    }

    /// Delete the credentials of `username` within `realm`
    pub fn remove(
        &self,
        username: &str,
        realm: Option<&str>,
    ) -> Result<impl Future<Output = Result<()>> + Send + '_> {
        require_username(username)?;

        let name = StoragePassword::resource_name(username, realm);
        Ok(async move {
            self.inner.remove_entity(&name).await?;
            info!("Removed storage password {}", name);
            Ok(())
        })
    }

    /// Fetch every stored credential
    pub async fn get_all(&mut self) -> Result<()> {
        self.inner.get_all().await
    }

    /// Refresh the whole collection, discarding any slice narrowing
    pub async fn reload(&mut self) -> Result<()> {
        self.inner.reload().await
    }
}

fn require_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::invalid_argument("username", "Username cannot be empty"));
    }
    Ok(())
}

fn require_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::invalid_argument("password", "Password cannot be empty"));
    }
    Ok(())
}

impl Paginated for StoragePasswordCollection {
    fn pagination(&self) -> &Pagination {
        self.inner.pagination()
    }

    fn messages(&self) -> &[Message] {
        self.inner.messages()
    }
}

impl Index<usize> for StoragePasswordCollection {
    type Output = StoragePassword;

    fn index(&self, index: usize) -> &Self::Output {
        &self.inner[index]
    }
}

impl<'a> IntoIterator for &'a StoragePasswordCollection {
    type Item = &'a StoragePassword;
    type IntoIter = std::slice::Iter<'a, StoragePassword>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl fmt::Debug for StoragePasswordCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoragePasswordCollection")
            .field("inner", &self.inner)
            .field("page_size", &self.page_size)
            .finish()
    }
}
