use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ModuleService;
use crate::errors::{Result, SchoolError};
use crate::models::{
    ApiResponse, ErrorCode,
    modules::{
        requests::{CreateModuleRequest, NewModule},
        responses::ModuleResponse,
    },
};
use crate::services::{error_response, error_response_with_code};
use crate::utils::validate::{optional_trimmed, require_non_empty};

fn build_new_module(data: CreateModuleRequest) -> Result<NewModule> {
    Ok(NewModule {
        name: require_non_empty(data.name.as_deref(), "name")?,
        path: require_non_empty(data.path.as_deref(), "path")?,
        icon: optional_trimmed(data.icon),
        description: optional_trimmed(data.description),
        is_active: data.is_active.unwrap_or(true),
    })
}

pub async fn create_module(
    service: &ModuleService,
    module_data: CreateModuleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let new_module = match build_new_module(module_data) {
        Ok(module) => module,
        Err(e) => return Ok(error_response(request, e)),
    };

    let storage = match service.get_storage(request) {
        Ok(storage) => storage,
        Err(e) => return Ok(error_response(request, e)),
    };

    match storage.create_module(new_module).await {
        Ok(module) => Ok(HttpResponse::Created().json(ApiResponse::success(
            ModuleResponse { module },
            "Module created successfully",
        ))),
        Err(SchoolError::Conflict(_)) => Ok(error_response_with_code(
            request,
            SchoolError::conflict("A module with this name already exists"),
            ErrorCode::ModuleAlreadyExists,
        )),
        Err(e) => Ok(error_response(request, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_defaults_to_active() {
        let module = build_new_module(CreateModuleRequest {
            name: Some("Reports".to_string()),
            path: Some("/reports".to_string()),
            icon: Some(" ".to_string()),
            description: None,
            is_active: None,
        })
        .unwrap();
        assert!(module.is_active);
        assert_eq!(module.icon, None);
    }

    #[test]
    fn test_path_is_required() {
        let err = build_new_module(CreateModuleRequest {
            name: Some("Reports".to_string()),
            path: None,
            icon: None,
            description: None,
            is_active: None,
        })
        .unwrap_err();
        assert_eq!(err.message(), "path is required");
    }
}
