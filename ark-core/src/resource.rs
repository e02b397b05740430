//! Traits describing the resource kinds served by the API group.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::metadata::ObjectMeta;

/// Marker trait for the api scope of a resource kind
pub trait ResourceScope {}

/// Scope for kinds that live under a namespace
pub struct NamespaceResourceScope {}
impl ResourceScope for NamespaceResourceScope {}

/// Scope for kinds addressed at cluster level
pub struct ClusterResourceScope {}
impl ResourceScope for ClusterResourceScope {}

/// An accessor trait for a typed resource kind.
///
/// Implementors, using [`ObjectMeta`], SHOULD all have required properties:
/// - `.metadata`
/// - `.metadata.name`
///
/// And these optional properties:
/// - `.metadata.namespace`
/// - `.metadata.resource_version`
///
/// The associated constants drive url generation, so one `Api` instantiation
/// per kind covers the whole verb surface without per-kind request code.
pub trait Resource {
    /// Type information for the api scope of the resource
    type Scope: ResourceScope;

    /// Group of this kind
    const GROUP: &'static str;
    /// Version of the group
    const VERSION: &'static str;
    /// Singular PascalCase name of the kind
    const KIND: &'static str;
    /// The plural name of the kind
    ///
    /// This is known as the resource in apimachinery, we rename it for disambiguation.
    const PLURAL: &'static str;

    /// Returns apiVersion of this object
    fn api_version() -> String {
        if Self::GROUP.is_empty() {
            Self::VERSION.to_string()
        } else {
            format!("{}/{}", Self::GROUP, Self::VERSION)
        }
    }

    /// Creates a url path for http requests for this resource
    fn url_path(namespace: Option<&str>) -> String {
        let n = if let Some(ns) = namespace {
            format!("namespaces/{ns}/")
        } else {
            "".into()
        };
        format!(
            "/apis/{group}/{version}/{namespaces}{plural}",
            group = Self::GROUP,
            version = Self::VERSION,
            namespaces = n,
            plural = Self::PLURAL
        )
    }

    /// Metadata that all persisted resources must have
    fn meta(&self) -> &ObjectMeta;
    /// Metadata that all persisted resources must have
    fn meta_mut(&mut self) -> &mut ObjectMeta;
}

/// Helper methods for resources.
pub trait ResourceExt: Resource {
    /// Returns the name of the resource, panicking if it is unset
    ///
    /// Only use this function if you know that name is set; for example when
    /// the resource was received from the apiserver (post-admission),
    /// or if you constructed the resource with the name.
    fn name_unchecked(&self) -> String;

    /// Returns the most useful name identifier available
    ///
    /// This tries `name`, then `generateName`, and falls back on an empty
    /// string when neither is set. Intended for logging purposes.
    fn name_any(&self) -> String;

    /// The namespace the resource is in
    fn namespace(&self) -> Option<String>;
    /// The resource version
    fn resource_version(&self) -> Option<String>;
    /// Unique ID (if you delete resource and then create a new
    /// resource with the same name, it will have different ID)
    fn uid(&self) -> Option<String>;
    /// Returns the creation timestamp
    ///
    /// This is guaranteed to exist on resources received by the apiserver.
    fn creation_timestamp(&self) -> Option<DateTime<Utc>>;
    /// Returns resource labels
    fn labels(&self) -> &BTreeMap<String, String>;
    /// Provides mutable access to the labels
    fn labels_mut(&mut self) -> &mut BTreeMap<String, String>;
    /// Returns resource annotations
    fn annotations(&self) -> &BTreeMap<String, String>;
    /// Provides mutable access to the annotations
    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String>;
}

impl<K: Resource> ResourceExt for K {
    fn name_unchecked(&self) -> String {
        self.meta().name.clone().expect(".metadata.name missing")
    }

    fn name_any(&self) -> String {
        self.meta()
            .name
            .clone()
            .or_else(|| self.meta().generate_name.clone())
            .unwrap_or_default()
    }

    fn namespace(&self) -> Option<String> {
        self.meta().namespace.clone()
    }

    fn resource_version(&self) -> Option<String> {
        self.meta().resource_version.clone()
    }

    fn uid(&self) -> Option<String> {
        self.meta().uid.clone()
    }

    fn creation_timestamp(&self) -> Option<DateTime<Utc>> {
        self.meta().creation_timestamp
    }

    fn labels(&self) -> &BTreeMap<String, String> {
        &self.meta().labels
    }

    fn labels_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.meta_mut().labels
    }

    fn annotations(&self) -> &BTreeMap<String, String> {
        &self.meta().annotations
    }

    fn annotations_mut(&mut self) -> &mut BTreeMap<String, String> {
        &mut self.meta_mut().annotations
    }
}

#[cfg(test)]
mod test {
    use super::{ClusterResourceScope, NamespaceResourceScope, Resource};
    use crate::metadata::ObjectMeta;

    struct Namespaced(ObjectMeta);
    impl Resource for Namespaced {
        type Scope = NamespaceResourceScope;

        const GROUP: &'static str = "ark.heptio.com";
        const KIND: &'static str = "Schedule";
        const PLURAL: &'static str = "schedules";
        const VERSION: &'static str = "v1";

        fn meta(&self) -> &ObjectMeta {
            &self.0
        }

        fn meta_mut(&mut self) -> &mut ObjectMeta {
            &mut self.0
        }
    }

    struct Clustered(ObjectMeta);
    impl Resource for Clustered {
        type Scope = ClusterResourceScope;

        const GROUP: &'static str = "ark.heptio.com";
        const KIND: &'static str = "Config";
        const PLURAL: &'static str = "configs";
        const VERSION: &'static str = "v1";

        fn meta(&self) -> &ObjectMeta {
            &self.0
        }

        fn meta_mut(&mut self) -> &mut ObjectMeta {
            &mut self.0
        }
    }

    #[test]
    fn url_paths() {
        assert_eq!(
            Namespaced::url_path(Some("ops")),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules"
        );
        assert_eq!(Clustered::url_path(None), "/apis/ark.heptio.com/v1/configs");
    }

    #[test]
    fn api_version() {
        assert_eq!(Namespaced::api_version(), "ark.heptio.com/v1");
    }
}
