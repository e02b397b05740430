//! Generic object list wrapper and spec/status traits.
use serde::{Deserialize, Serialize};

use crate::metadata::ListMeta;

/// A generic typed object list
///
/// This is used instead of a full struct for `ScheduleList`, `BackupList`, etc.
/// The API exposes every list in this shape, so one generic type with a
/// deserialize bound on the items covers all kinds.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ObjectList<T>
where
    T: Clone,
{
    /// ListMeta - only really used for its `resourceVersion` and continue token
    pub metadata: ListMeta,

    /// The items we are actually interested in. In practice; `T := Resource`.
    #[serde(bound(deserialize = "Vec<T>: Deserialize<'de>"))]
    pub items: Vec<T>,
}

impl<T: Clone> ObjectList<T> {
    /// `iter` returns an Iterator over the elements of this ObjectList
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// `iter_mut` returns an Iterator of mutable references to the elements of this ObjectList
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }
}

impl<T: Clone> IntoIterator for ObjectList<T> {
    type IntoIter = ::std::vec::IntoIter<Self::Item>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a ObjectList<T> {
    type IntoIter = ::std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a mut ObjectList<T> {
    type IntoIter = ::std::slice::IterMut<'a, T>;
    type Item = &'a mut T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

/// A trait to access the `spec` of a resource.
pub trait HasSpec {
    /// The type of the `spec` of this resource
    type Spec;

    /// Returns a reference to the `spec` of the object
    fn spec(&self) -> &Self::Spec;

    /// Returns a mutable reference to the `spec` of the object
    fn spec_mut(&mut self) -> &mut Self::Spec;
}

/// A trait to access the `status` of a resource.
///
/// Implementing this marks the kind as having an independently tracked
/// status subresource; the status update methods on the typed accessor are
/// only available for such kinds.
pub trait HasStatus {
    /// The type of the `status` object
    type Status;

    /// Returns an optional reference to the `status` of the object
    fn status(&self) -> Option<&Self::Status>;

    /// Returns an optional mutable reference to the `status` of the object
    fn status_mut(&mut self) -> &mut Option<Self::Status>;
}

#[cfg(test)]
mod test {
    use super::ObjectList;
    use crate::metadata::ListMeta;

    #[test]
    fn list_iterators() {
        let metadata = ListMeta::default();
        let items = vec![1, 2, 3];
        let objectlist = ObjectList { metadata, items };

        assert_eq!(objectlist.iter().next(), Some(&1));
        let sum: i32 = objectlist.into_iter().sum();
        assert_eq!(sum, 6);
    }

    #[test]
    fn list_deserializes_with_continue_token() {
        let data = r#"{
          "metadata": { "resourceVersion": "31", "continue": "next-page" },
          "items": [ { "x": 1 } ]
        }"#;
        let list: ObjectList<serde_json::Value> = serde_json::from_str(data).unwrap();
        assert_eq!(list.metadata.continue_token.as_deref(), Some("next-page"));
        assert_eq!(list.items.len(), 1);
    }
}
