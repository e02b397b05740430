//! Request builder type for the API
//!
//! Takes the url path of a resource collection and supplies constructors
//! for the requests of each supported verb. All request methods return
//! plain `http::Request` values for an external transport to execute.
use crate::params::{DeleteParams, GetParams, ListParams, Patch, PatchParams, PostParams};
use serde::Serialize;
use thiserror::Error;

/// Possible errors when building a request.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to build a request.
    #[error("failed to build request: {0}")]
    BuildRequest(#[source] http::Error),

    /// Failed to serialize body.
    #[error("failed to serialize body: {0}")]
    SerializeBody(#[source] serde_json::Error),

    /// Failed to validate request.
    #[error("failed to validate request: {0}")]
    Validation(String),
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

/// A request builder for one resource collection
///
/// Takes the collection's url path and supplies constructors for common operations.
#[derive(Debug, Clone)]
pub struct Request {
    /// The path component of a url, scoping the builder to one namespace and kind
    pub url_path: String,
}

impl Request {
    /// New request with a resource's url path
    pub fn new<S: Into<String>>(url_path: S) -> Self {
        Self {
            url_path: url_path.into(),
        }
    }
}

// The apiserver rejects these too, but an empty name would silently address
// the whole collection instead of one resource.
fn non_empty<'a>(name: &'a str, field: &str) -> Result<&'a str> {
    if name.is_empty() {
        return Err(Error::Validation(format!("{field} may not be empty")));
    }
    Ok(name)
}

/// Convenience methods found from API conventions
impl Request {
    /// Get a single instance
    pub fn get(&self, name: &str, gp: &GetParams) -> Result<http::Request<Vec<u8>>> {
        let target = format!("{}/{}?", self.url_path, non_empty(name, "name")?);
        let mut qp = form_urlencoded::Serializer::new(target);
        if let Some(rv) = &gp.resource_version {
            qp.append_pair("resourceVersion", rv);
        }
        let urlstr = qp.finish();
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// List a collection of a resource
    pub fn list(&self, lp: &ListParams) -> Result<http::Request<Vec<u8>>> {
        let target = format!("{}?", self.url_path);
        let mut qp = form_urlencoded::Serializer::new(target);
        lp.populate_qp(&mut qp);
        let urlstr = qp.finish();
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// Watch a collection for change events
    ///
    /// The watch flag is always set; the resource version to watch from is
    /// taken from the params and defaults to `"0"`.
    pub fn watch(&self, lp: &ListParams) -> Result<http::Request<Vec<u8>>> {
        lp.validate_watch()?;
        let target = format!("{}?", self.url_path);
        let mut qp = form_urlencoded::Serializer::new(target);

        qp.append_pair("watch", "true");
        qp.append_pair(
            "resourceVersion",
            lp.resource_version.as_deref().unwrap_or("0"),
        );
        // https://github.com/kubernetes/kubernetes/issues/6513
        qp.append_pair("timeoutSeconds", &lp.timeout.unwrap_or(290).to_string());
        if let Some(fields) = &lp.field_selector {
            qp.append_pair("fieldSelector", fields);
        }
        if let Some(labels) = &lp.label_selector {
            qp.append_pair("labelSelector", labels);
        }

        let urlstr = qp.finish();
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// Create an instance of a resource
    pub fn create(&self, pp: &PostParams, data: Vec<u8>) -> Result<http::Request<Vec<u8>>> {
        pp.validate()?;
        let target = format!("{}?", self.url_path);
        let mut qp = form_urlencoded::Serializer::new(target);
        pp.populate_qp(&mut qp);
        let urlstr = qp.finish();
        let req = http::Request::post(urlstr);
        req.body(data).map_err(Error::BuildRequest)
    }

    /// Replace an instance of a resource
    ///
    /// Requires `metadata.resourceVersion` set in data
    pub fn replace(&self, name: &str, pp: &PostParams, data: Vec<u8>) -> Result<http::Request<Vec<u8>>> {
        pp.validate()?;
        let target = format!("{}/{}?", self.url_path, non_empty(name, "name")?);
        let mut qp = form_urlencoded::Serializer::new(target);
        pp.populate_qp(&mut qp);
        let urlstr = qp.finish();
        let req = http::Request::put(urlstr);
        req.body(data).map_err(Error::BuildRequest)
    }

    /// Delete an instance of a resource
    pub fn delete(&self, name: &str, dp: &DeleteParams) -> Result<http::Request<Vec<u8>>> {
        let target = format!("{}/{}?", self.url_path, non_empty(name, "name")?);
        let mut qp = form_urlencoded::Serializer::new(target);
        let urlstr = qp.finish();
        let body = serde_json::to_vec(&dp).map_err(Error::SerializeBody)?;
        let req = http::Request::delete(urlstr);
        req.body(body).map_err(Error::BuildRequest)
    }

    /// Delete all instances of a resource matching the list selectors
    pub fn delete_collection(
        &self,
        dp: &DeleteParams,
        lp: &ListParams,
    ) -> Result<http::Request<Vec<u8>>> {
        let target = format!("{}?", self.url_path);
        let mut qp = form_urlencoded::Serializer::new(target);
        lp.populate_qp(&mut qp);
        let urlstr = qp.finish();
        let body = serde_json::to_vec(&dp).map_err(Error::SerializeBody)?;
        let req = http::Request::delete(urlstr);
        req.body(body).map_err(Error::BuildRequest)
    }

    /// Patch an instance of a resource
    pub fn patch<P: Serialize>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<http::Request<Vec<u8>>> {
        pp.validate()?;
        let target = format!("{}/{}?", self.url_path, non_empty(name, "name")?);
        let mut qp = form_urlencoded::Serializer::new(target);
        pp.populate_qp(&mut qp);
        let urlstr = qp.finish();

        http::Request::patch(urlstr)
            .header(http::header::ACCEPT, "application/json")
            .header(http::header::CONTENT_TYPE, patch.content_type())
            .body(patch.serialize().map_err(Error::SerializeBody)?)
            .map_err(Error::BuildRequest)
    }
}

/// Subresources
impl Request {
    /// Get an instance of the subresource
    pub fn get_subresource(
        &self,
        subresource_name: &str,
        name: &str,
    ) -> Result<http::Request<Vec<u8>>> {
        let target = format!(
            "{}/{}/{}?",
            self.url_path,
            non_empty(name, "name")?,
            non_empty(subresource_name, "subresource name")?
        );
        let mut qp = form_urlencoded::Serializer::new(target);
        let urlstr = qp.finish();
        let req = http::Request::get(urlstr);
        req.body(vec![]).map_err(Error::BuildRequest)
    }

    /// Replace an instance of the subresource
    pub fn replace_subresource(
        &self,
        subresource_name: &str,
        name: &str,
        pp: &PostParams,
        data: Vec<u8>,
    ) -> Result<http::Request<Vec<u8>>> {
        pp.validate()?;
        let target = format!(
            "{}/{}/{}?",
            self.url_path,
            non_empty(name, "name")?,
            non_empty(subresource_name, "subresource name")?
        );
        let mut qp = form_urlencoded::Serializer::new(target);
        pp.populate_qp(&mut qp);
        let urlstr = qp.finish();
        let req = http::Request::put(urlstr);
        req.body(data).map_err(Error::BuildRequest)
    }

    /// Patch an instance of the subresource
    pub fn patch_subresource<P: Serialize>(
        &self,
        subresource_name: &str,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<http::Request<Vec<u8>>> {
        pp.validate()?;
        let target = format!(
            "{}/{}/{}?",
            self.url_path,
            non_empty(name, "name")?,
            non_empty(subresource_name, "subresource name")?
        );
        let mut qp = form_urlencoded::Serializer::new(target);
        pp.populate_qp(&mut qp);
        let urlstr = qp.finish();

        http::Request::patch(urlstr)
            .header(http::header::ACCEPT, "application/json")
            .header(http::header::CONTENT_TYPE, patch.content_type())
            .body(patch.serialize().map_err(Error::SerializeBody)?)
            .map_err(Error::BuildRequest)
    }
}

/// Sanity checks for the url paths of generated requests
#[cfg(test)]
mod test {
    use crate::{
        metadata::ObjectMeta,
        params::{DeleteParams, GetParams, ListParams, Patch, PatchParams, PostParams},
        request::Request,
        resource::{NamespaceResourceScope, Resource},
    };

    #[derive(Clone)]
    struct TestSchedule {
        meta: ObjectMeta,
    }

    impl Resource for TestSchedule {
        type Scope = NamespaceResourceScope;

        const GROUP: &'static str = "ark.heptio.com";
        const KIND: &'static str = "Schedule";
        const PLURAL: &'static str = "schedules";
        const VERSION: &'static str = "v1";

        fn meta(&self) -> &ObjectMeta {
            &self.meta
        }

        fn meta_mut(&mut self) -> &mut ObjectMeta {
            &mut self.meta
        }
    }

    fn schedules(ns: &str) -> Request {
        Request::new(TestSchedule::url_path(Some(ns)))
    }

    #[test]
    fn get_path() {
        let req = schedules("ops")
            .get("daily-backup", &GetParams::default())
            .unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules/daily-backup?"
        );
        assert_eq!(req.method(), "GET");
    }

    #[test]
    fn get_path_with_version() {
        let req = schedules("ops").get("daily-backup", &GetParams::any()).unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules/daily-backup?&resourceVersion=0"
        );
    }

    #[test]
    fn get_rejects_empty_name() {
        let err = schedules("ops").get("", &GetParams::default()).unwrap_err();
        assert!(err.to_string().contains("may not be empty"));
    }

    #[test]
    fn list_path() {
        let req = schedules("ops").list(&ListParams::default()).unwrap();
        assert_eq!(req.uri(), "/apis/ark.heptio.com/v1/namespaces/ops/schedules?");
    }

    #[test]
    fn list_path_with_selectors() {
        let lp = ListParams::default().labels("app=ark").limit(50);
        let req = schedules("ops").list(&lp).unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules?&labelSelector=app%3Dark&limit=50"
        );
    }

    #[test]
    fn watch_path() {
        let req = schedules("ops").watch(&ListParams::default()).unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules?&watch=true&resourceVersion=0&timeoutSeconds=290"
        );
    }

    #[test]
    fn watch_path_at_version() {
        let lp = ListParams::default().at("31").timeout(20);
        let req = schedules("ops").watch(&lp).unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules?&watch=true&resourceVersion=31&timeoutSeconds=20"
        );
    }

    #[test]
    fn watch_rejects_limits() {
        let lp = ListParams::default().limit(5);
        assert!(schedules("ops").watch(&lp).is_err());
    }

    #[test]
    fn create_path() {
        let req = schedules("ops")
            .create(&PostParams::default(), vec![])
            .unwrap();
        assert_eq!(req.uri(), "/apis/ark.heptio.com/v1/namespaces/ops/schedules?");
        assert_eq!(req.method(), "POST");
    }

    #[test]
    fn replace_path_with_dry_run() {
        let pp = PostParams {
            dry_run: true,
            ..Default::default()
        };
        let req = schedules("ops").replace("daily-backup", &pp, vec![]).unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules/daily-backup?&dryRun=All"
        );
        assert_eq!(req.method(), "PUT");
    }

    #[test]
    fn delete_path() {
        let req = schedules("ops")
            .delete("daily-backup", &DeleteParams::default())
            .unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules/daily-backup?"
        );
        assert_eq!(req.method(), "DELETE");
        assert_eq!(req.body(), b"{}");
    }

    #[test]
    fn delete_collection_path() {
        let lp = ListParams::default().labels("app=myapp");
        let req = schedules("ops")
            .delete_collection(&DeleteParams::default(), &lp)
            .unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules?&labelSelector=app%3Dmyapp"
        );
        assert_eq!(req.method(), "DELETE");
    }

    #[test]
    fn patch_path_and_headers() {
        let pp = PatchParams::default();
        let req = schedules("ops")
            .patch("daily-backup", &pp, &Patch::Merge(()))
            .unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules/daily-backup?"
        );
        assert_eq!(req.method(), "PATCH");
        assert_eq!(
            req.headers().get("Content-Type").unwrap().to_str().unwrap(),
            "application/merge-patch+json"
        );
    }

    #[test]
    fn patch_status_path() {
        let pp = PatchParams::default();
        let req = schedules("ops")
            .patch_subresource("status", "daily-backup", &pp, &Patch::Merge(()))
            .unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules/daily-backup/status?"
        );
        assert_eq!(req.method(), "PATCH");
    }

    #[test]
    fn replace_status_path() {
        let pp = PostParams::default();
        let req = schedules("ops")
            .replace_subresource("status", "daily-backup", &pp, vec![])
            .unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules/daily-backup/status?"
        );
        assert_eq!(req.method(), "PUT");
    }

    #[test]
    fn get_status_path() {
        let req = schedules("ops")
            .get_subresource("status", "daily-backup")
            .unwrap();
        assert_eq!(
            req.uri(),
            "/apis/ark.heptio.com/v1/namespaces/ops/schedules/daily-backup/status?"
        );
        assert_eq!(req.method(), "GET");
    }
}
