use utoipa::OpenApi;

use crate::{project, tag, task};

/// OpenAPI document for the resource routes.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskboard API",
        description = "CRUD endpoints for projects, tags and tasks"
    ),
    paths(
        project::api::list_projects_handler,
        project::api::create_project_handler,
        project::api::update_project_handler,
        project::api::delete_project_handler,
        tag::api::list_tags_handler,
        tag::api::create_tag_handler,
        tag::api::update_tag_handler,
        tag::api::delete_tag_handler,
        task::api::list_tasks_handler,
        task::api::create_task_handler,
        task::api::update_task_handler,
        task::api::delete_task_handler,
    ),
    components(schemas(task::Priority)),
    tags(
        (name = "Projects", description = "Project records"),
        (name = "Tags", description = "Tag records"),
        (name = "Tasks", description = "Task records")
    )
)]
pub struct ApiDoc;
