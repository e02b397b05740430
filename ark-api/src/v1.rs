//! Types of the `ark.heptio.com/v1` API group.
use ark_core::{
    metadata::{ObjectMeta, TypeMeta},
    object::{HasSpec, HasStatus},
    NamespaceResourceScope, Resource,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Group served by these kinds
pub const GROUP: &str = "ark.heptio.com";
/// Version of the group
pub const VERSION: &str = "v1";

/// Defines the specification for a backup, or the backup half of a schedule.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupSpec {
    /// The namespaces to include in the backup; `["*"]` or empty means all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_namespaces: Vec<String>,

    /// The namespaces to exclude from the backup
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_namespaces: Vec<String>,

    /// The resource kinds to include in the backup
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_resources: Vec<String>,

    /// The resource kinds to exclude from the backup
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_resources: Vec<String>,

    /// Whether to take snapshots of any PersistentVolumes referenced in the backup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_volumes: Option<bool>,

    /// Whether cluster scoped resources should be included, unset means automatic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_cluster_resources: Option<bool>,

    /// How long the backup lives before it is eligible for garbage collection,
    /// in the Go duration format the server emits (e.g. `"720h0m0s"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
}

/// Lifecycle phase of a backup.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub enum BackupPhase {
    /// The backup has been created but not yet processed
    New,
    /// The backup spec failed server-side validation and will not run
    FailedValidation,
    /// The backup is currently executing
    InProgress,
    /// The backup ran successfully
    Completed,
    /// The backup ran but encountered an error
    Failed,
}

/// Current state of a backup, owned by the server.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupStatus {
    /// The current phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<BackupPhase>,

    /// Version of the backup format
    #[serde(default)]
    pub version: i32,

    /// When this backup is eligible for garbage collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,

    /// Validation failures found when processing the spec
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<String>,
}

/// A single point-in-time backup of cluster resources.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Backup {
    /// apiVersion + kind, set on objects exchanged with the server
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Standard object metadata
    pub metadata: ObjectMeta,

    /// What the backup should capture
    pub spec: BackupSpec,

    /// Most recently observed backup state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BackupStatus>,
}

impl Backup {
    /// Construct a named Backup with the given spec
    pub fn new(name: &str, spec: BackupSpec) -> Self {
        Self {
            types: Some(TypeMeta {
                api_version: <Self as Resource>::api_version(),
                kind: <Self as Resource>::KIND.to_string(),
            }),
            metadata: ObjectMeta {
                name: Some(name.into()),
                ..ObjectMeta::default()
            },
            spec,
            status: None,
        }
    }
}

impl Resource for Backup {
    type Scope = NamespaceResourceScope;

    const GROUP: &'static str = GROUP;
    const KIND: &'static str = "Backup";
    const PLURAL: &'static str = "backups";
    const VERSION: &'static str = VERSION;

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl HasSpec for Backup {
    type Spec = BackupSpec;

    fn spec(&self) -> &BackupSpec {
        &self.spec
    }

    fn spec_mut(&mut self) -> &mut BackupSpec {
        &mut self.spec
    }
}

impl HasStatus for Backup {
    type Status = BackupStatus;

    fn status(&self) -> Option<&BackupStatus> {
        self.status.as_ref()
    }

    fn status_mut(&mut self) -> &mut Option<BackupStatus> {
        &mut self.status
    }
}

/// Defines the specification for a schedule: a backup template fired on a
/// cron expression.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSpec {
    /// The backup specification each firing instantiates
    pub template: BackupSpec,

    /// The cron expression defining when to run the template
    pub schedule: String,
}

/// Lifecycle phase of a schedule.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub enum SchedulePhase {
    /// The schedule has been created but not yet processed
    New,
    /// The schedule has been validated and will trigger backups
    Enabled,
    /// The schedule spec failed server-side validation and will not trigger
    FailedValidation,
}

/// Current state of a schedule, owned by the server.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStatus {
    /// The current phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<SchedulePhase>,

    /// When the schedule last fired a backup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_backup: Option<DateTime<Utc>>,

    /// Validation failures found when processing the spec
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<String>,
}

/// A recurring backup defined by a cron expression and a backup template.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Schedule {
    /// apiVersion + kind, set on objects exchanged with the server
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,

    /// Standard object metadata
    pub metadata: ObjectMeta,

    /// When to fire, and what each firing backs up
    pub spec: ScheduleSpec,

    /// Most recently observed schedule state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ScheduleStatus>,
}

impl Schedule {
    /// Construct a named Schedule with the given spec
    pub fn new(name: &str, spec: ScheduleSpec) -> Self {
        Self {
            types: Some(TypeMeta {
                api_version: <Self as Resource>::api_version(),
                kind: <Self as Resource>::KIND.to_string(),
            }),
            metadata: ObjectMeta {
                name: Some(name.into()),
                ..ObjectMeta::default()
            },
            spec,
            status: None,
        }
    }
}

impl Resource for Schedule {
    type Scope = NamespaceResourceScope;

    const GROUP: &'static str = GROUP;
    const KIND: &'static str = "Schedule";
    const PLURAL: &'static str = "schedules";
    const VERSION: &'static str = VERSION;

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl HasSpec for Schedule {
    type Spec = ScheduleSpec;

    fn spec(&self) -> &ScheduleSpec {
        &self.spec
    }

    fn spec_mut(&mut self) -> &mut ScheduleSpec {
        &mut self.spec
    }
}

impl HasStatus for Schedule {
    type Status = ScheduleStatus;

    fn status(&self) -> Option<&ScheduleStatus> {
        self.status.as_ref()
    }

    fn status_mut(&mut self) -> &mut Option<ScheduleStatus> {
        &mut self.status
    }
}
