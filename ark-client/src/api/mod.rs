//! API helpers for structured interaction with the apiserver
mod core_methods;
mod subresource;

use std::fmt::Debug;

// Re-exports from ark-core
pub use ark_core::{
    metadata::{ListMeta, ObjectMeta, TypeMeta},
    object::{HasSpec, HasStatus, ObjectList},
    params::{
        DeleteParams, GetParams, ListParams, Patch, PatchParams, PostParams, Preconditions,
        PropagationPolicy,
    },
    request::Request,
    NamespaceResourceScope, Resource, ResourceExt, WatchEvent,
};

use crate::Client;

/// The generic Api abstraction
///
/// This abstracts over a [`Request`] and a type `K` so that
/// we get automatic serialization/deserialization on the api calls
/// implemented by [`Resource`].
///
/// An instance is scoped to one kind and (for namespaced kinds) one
/// namespace; it holds no other state, so clones are cheap and calls from
/// concurrent tasks need no coordination.
#[derive(Clone)]
pub struct Api<K> {
    /// The request builder object with its resource dependent url
    pub(crate) request: Request,
    /// The client to use (from this library)
    pub(crate) client: Client,
    namespace: Option<String>,
    /// Note: Using `iter::Empty` over `PhantomData`, because we never actually keep any
    /// `K` objects, so `Empty` better models our constraints (in particular, `Empty<K>`
    /// is `Send`, even if `K` may not be).
    pub(crate) _phantom: std::iter::Empty<K>,
}

/// Api constructors for Resource implementors
impl<K: Resource> Api<K> {
    /// Cluster level resources, or resources viewed across all namespaces
    pub fn all(client: Client) -> Self {
        let url = K::url_path(None);
        Self {
            client,
            request: Request::new(url),
            namespace: None,
            _phantom: std::iter::empty(),
        }
    }

    /// Namespaced resource within a given namespace
    ///
    /// This will ONLY work on namespaced resources as set by their `Scope`.
    pub fn namespaced(client: Client, ns: &str) -> Self
    where
        K: Resource<Scope = NamespaceResourceScope>,
    {
        let url = K::url_path(Some(ns));
        Self {
            client,
            request: Request::new(url),
            namespace: Some(ns.to_string()),
            _phantom: std::iter::empty(),
        }
    }

    /// Namespaced resource within the client's default namespace
    ///
    /// This will ONLY work on namespaced resources as set by their `Scope`.
    pub fn default_namespaced(client: Client) -> Self
    where
        K: Resource<Scope = NamespaceResourceScope>,
    {
        let ns = client.default_ns().to_string();
        Self::namespaced(client, &ns)
    }

    /// Consume self and return the [`Client`]
    pub fn into_client(self) -> Client {
        self.into()
    }

    /// Return a reference to the current resource url path
    pub fn resource_url(&self) -> &str {
        &self.request.url_path
    }
}

impl<K> From<Api<K>> for Client {
    fn from(api: Api<K>) -> Self {
        api.client
    }
}

impl<K> Debug for Api<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Intentionally destructuring, to cause compile errors when new fields are added
        let Self {
            request,
            client: _,
            namespace,
            _phantom,
        } = self;
        f.debug_struct("Api")
            .field("request", &request)
            .field("client", &"...")
            .field("namespace", &namespace)
            .finish()
    }
}

/// Sanity test on scope restrictions
#[cfg(test)]
mod test {
    use crate::{client::Body, Api, Client};
    use ark_api::v1::{Backup, Schedule};

    use http::{Request, Response};
    use tower_test::mock;

    #[tokio::test]
    async fn scopes_should_allow_correct_interface() {
        let (mock_service, _handle) = mock::pair::<Request<Body>, Response<Body>>();
        let client = Client::new(mock_service, "default");

        let _: Api<Schedule> = Api::namespaced(client.clone(), "heptio-ark");
        let _: Api<Backup> = Api::default_namespaced(client.clone());
        let _: Api<Schedule> = Api::all(client);
    }

    #[tokio::test]
    async fn api_url_is_scoped() {
        let (mock_service, _handle) = mock::pair::<Request<Body>, Response<Body>>();
        let client = Client::new(mock_service, "default");
        let api: Api<Schedule> = Api::namespaced(client, "ops");
        assert_eq!(
            api.resource_url(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules"
        );
    }
}
