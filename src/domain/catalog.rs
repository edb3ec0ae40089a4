//! The fixed set of Rootly tools
//!
//! [`RootlyTool`] is the single source for both the `tools/list` catalog and the upstream
//! endpoint each tool maps to, so the two cannot drift apart.

use std::collections::HashMap;

use rust_mcp_sdk::schema::{Tool, ToolInputSchema};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootlyTool {
    GetIncidents,
    GetIncidentAlerts,
    GetAlerts,
    GetAlert,
    GetSeverities,
    GetSeverity,
    GetTeams,
    GetTeam,
    GetServices,
    GetService,
    GetFunctionalities,
    GetFunctionality,
    GetIncidentTypes,
    GetIncidentType,
    GetIncidentActionItems,
    GetIncidentActionItem,
    GetIncidentActionItemsForIncident,
    GetWorkflows,
    GetWorkflow,
    GetWorkflowRuns,
    GetWorkflowRun,
    GetEnvironments,
    GetEnvironment,
    GetUsers,
    GetUser,
    GetCurrentUser,
    GetStatusPages,
    GetStatusPage,
}

/// The single argument a tool declares in its input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolParameter {
    None,
    Limit { description: &'static str },
    Id { name: &'static str, description: &'static str },
}

/// Where a tool's upstream resource lives, relative to `/v1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/v1/<path...>`, no interpolation.
    Fixed(&'static [&'static str]),
    /// `/v1/<collection>/<id>`
    Member { collection: &'static str },
    /// `/v1/<collection>/<id>/<child>`
    Nested {
        collection: &'static str,
        child: &'static str,
    },
}

/// Page size applied to the primary listing tools when the caller gives no `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

impl RootlyTool {
    pub const ALL: [RootlyTool; 28] = [
        Self::GetIncidents,
        Self::GetIncidentAlerts,
        Self::GetAlerts,
        Self::GetAlert,
        Self::GetSeverities,
        Self::GetSeverity,
        Self::GetTeams,
        Self::GetTeam,
        Self::GetServices,
        Self::GetService,
        Self::GetFunctionalities,
        Self::GetFunctionality,
        Self::GetIncidentTypes,
        Self::GetIncidentType,
        Self::GetIncidentActionItems,
        Self::GetIncidentActionItem,
        Self::GetIncidentActionItemsForIncident,
        Self::GetWorkflows,
        Self::GetWorkflow,
        Self::GetWorkflowRuns,
        Self::GetWorkflowRun,
        Self::GetEnvironments,
        Self::GetEnvironment,
        Self::GetUsers,
        Self::GetUser,
        Self::GetCurrentUser,
        Self::GetStatusPages,
        Self::GetStatusPage,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::GetIncidents => "get_incidents",
            Self::GetIncidentAlerts => "get_incident_alerts",
            Self::GetAlerts => "get_alerts",
            Self::GetAlert => "get_alert",
            Self::GetSeverities => "get_severities",
            Self::GetSeverity => "get_severity",
            Self::GetTeams => "get_teams",
            Self::GetTeam => "get_team",
            Self::GetServices => "get_services",
            Self::GetService => "get_service",
            Self::GetFunctionalities => "get_functionalities",
            Self::GetFunctionality => "get_functionality",
            Self::GetIncidentTypes => "get_incident_types",
            Self::GetIncidentType => "get_incident_type",
            Self::GetIncidentActionItems => "get_incident_action_items",
            Self::GetIncidentActionItem => "get_incident_action_item",
            Self::GetIncidentActionItemsForIncident => "get_incident_action_items_for_incident",
            Self::GetWorkflows => "get_workflows",
            Self::GetWorkflow => "get_workflow",
            Self::GetWorkflowRuns => "get_workflow_runs",
            Self::GetWorkflowRun => "get_workflow_run",
            Self::GetEnvironments => "get_environments",
            Self::GetEnvironment => "get_environment",
            Self::GetUsers => "get_users",
            Self::GetUser => "get_user",
            Self::GetCurrentUser => "get_current_user",
            Self::GetStatusPages => "get_status_pages",
            Self::GetStatusPage => "get_status_page",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::GetIncidents => "Get incidents from Rootly",
            Self::GetIncidentAlerts => "Get alerts for a specific incident",
            Self::GetAlerts => "Get alerts from Rootly",
            Self::GetAlert => "Get specific alert by ID",
            Self::GetSeverities => "Get severity levels",
            Self::GetSeverity => "Get specific severity by ID",
            Self::GetTeams => "Get teams",
            Self::GetTeam => "Get specific team by ID",
            Self::GetServices => "Get services",
            Self::GetService => "Get specific service by ID",
            Self::GetFunctionalities => "Get functionalities",
            Self::GetFunctionality => "Get specific functionality by ID",
            Self::GetIncidentTypes => "Get incident types",
            Self::GetIncidentType => "Get specific incident type by ID",
            Self::GetIncidentActionItems => "Get incident action items",
            Self::GetIncidentActionItem => "Get specific incident action item by ID",
            Self::GetIncidentActionItemsForIncident => "Get action items for specific incident",
            Self::GetWorkflows => "Get workflows",
            Self::GetWorkflow => "Get specific workflow by ID",
            Self::GetWorkflowRuns => "Get workflow runs",
            Self::GetWorkflowRun => "Get specific workflow run by ID",
            Self::GetEnvironments => "Get environments",
            Self::GetEnvironment => "Get specific environment by ID",
            Self::GetUsers => "Get users",
            Self::GetUser => "Get specific user by ID",
            Self::GetCurrentUser => "Get current user info",
            Self::GetStatusPages => "Get status pages",
            Self::GetStatusPage => "Get specific status page by ID",
        }
    }

    pub fn parameter(self) -> ToolParameter {
        let id = |name, description| ToolParameter::Id { name, description };

        match self {
            Self::GetIncidents => ToolParameter::Limit {
                description: "Number of incidents (default: 10)",
            },
            Self::GetAlerts => ToolParameter::Limit {
                description: "Number of alerts (default: 10)",
            },
            Self::GetIncidentAlerts | Self::GetIncidentActionItemsForIncident => {
                id("incident_id", "Incident ID")
            }
            Self::GetAlert => id("alert_id", "Alert ID"),
            Self::GetSeverity => id("severity_id", "Severity ID"),
            Self::GetTeam => id("team_id", "Team ID"),
            Self::GetService => id("service_id", "Service ID"),
            Self::GetFunctionality => id("functionality_id", "Functionality ID"),
            Self::GetIncidentType => id("incident_type_id", "Incident Type ID"),
            Self::GetIncidentActionItem => {
                id("incident_action_item_id", "Incident Action Item ID")
            }
            Self::GetWorkflow => id("workflow_id", "Workflow ID"),
            Self::GetWorkflowRun => id("workflow_run_id", "Workflow Run ID"),
            Self::GetEnvironment => id("environment_id", "Environment ID"),
            Self::GetUser => id("user_id", "User ID"),
            Self::GetStatusPage => id("status_page_id", "Status Page ID"),
            Self::GetSeverities
            | Self::GetTeams
            | Self::GetServices
            | Self::GetFunctionalities
            | Self::GetIncidentTypes
            | Self::GetIncidentActionItems
            | Self::GetWorkflows
            | Self::GetWorkflowRuns
            | Self::GetEnvironments
            | Self::GetUsers
            | Self::GetCurrentUser
            | Self::GetStatusPages => ToolParameter::None,
        }
    }

    pub fn endpoint(self) -> Endpoint {
        use Endpoint::{Fixed, Member, Nested};

        match self {
            Self::GetIncidents => Fixed(&["incidents"]),
            Self::GetIncidentAlerts => Nested {
                collection: "incidents",
                child: "alerts",
            },
            Self::GetAlerts => Fixed(&["alerts"]),
            Self::GetAlert => Member { collection: "alerts" },
            Self::GetSeverities => Fixed(&["severities"]),
            Self::GetSeverity => Member {
                collection: "severities",
            },
            Self::GetTeams => Fixed(&["teams"]),
            Self::GetTeam => Member { collection: "teams" },
            Self::GetServices => Fixed(&["services"]),
            Self::GetService => Member {
                collection: "services",
            },
            Self::GetFunctionalities => Fixed(&["functionalities"]),
            Self::GetFunctionality => Member {
                collection: "functionalities",
            },
            Self::GetIncidentTypes => Fixed(&["incident_types"]),
            Self::GetIncidentType => Member {
                collection: "incident_types",
            },
            Self::GetIncidentActionItems => Fixed(&["incident_action_items"]),
            Self::GetIncidentActionItem => Member {
                collection: "incident_action_items",
            },
            Self::GetIncidentActionItemsForIncident => Nested {
                collection: "incidents",
                child: "action_items",
            },
            Self::GetWorkflows => Fixed(&["workflows"]),
            Self::GetWorkflow => Member {
                collection: "workflows",
            },
            Self::GetWorkflowRuns => Fixed(&["workflow_runs"]),
            Self::GetWorkflowRun => Member {
                collection: "workflow_runs",
            },
            Self::GetEnvironments => Fixed(&["environments"]),
            Self::GetEnvironment => Member {
                collection: "environments",
            },
            Self::GetUsers => Fixed(&["users"]),
            Self::GetUser => Member { collection: "users" },
            Self::GetCurrentUser => Fixed(&["users", "me"]),
            Self::GetStatusPages => Fixed(&["status_pages"]),
            Self::GetStatusPage => Member {
                collection: "status_pages",
            },
        }
    }

    /// Incidents and alerts always paginate; every other tool only when `limit` is given.
    pub fn default_page_size(self) -> Option<u32> {
        match self {
            Self::GetIncidents | Self::GetAlerts => Some(DEFAULT_PAGE_SIZE),
            _ => None,
        }
    }

    pub fn descriptor(self) -> Tool {
        Tool {
            annotations: None,
            description: Some(self.description().to_string()),
            execution: None,
            icons: vec![],
            input_schema: input_schema(self.parameter()),
            meta: None,
            name: self.name().to_string(),
            output_schema: None,
            title: None,
        }
    }
}

fn property(type_: &str, description: &str) -> Map<String, Value> {
    Map::from_iter([
        ("type".to_string(), json!(type_)),
        ("description".to_string(), json!(description)),
    ])
}

fn input_schema(parameter: ToolParameter) -> ToolInputSchema {
    let (required, properties) = match parameter {
        ToolParameter::None => (vec![], HashMap::new()),
        ToolParameter::Limit { description } => (
            vec![],
            HashMap::from([("limit".to_string(), property("number", description))]),
        ),
        ToolParameter::Id { name, description } => (
            vec![name.to_string()],
            HashMap::from([(name.to_string(), property("string", description))]),
        ),
    };

    ToolInputSchema::new(required, Some(properties), None)
}

pub fn build_tools_list() -> Vec<Tool> {
    RootlyTool::ALL.into_iter().map(RootlyTool::descriptor).collect()
}
