/// Return the request with HTTP 422
#[macro_export]
macro_rules! validation_error {
    ($message:expr) => {
        return Err(crate::errors::ServiceError::ValidationError(
            $message.to_string(),
        ));
    };
}

/// Answer the request with HTTP 201 and the object as response body
#[macro_export]
macro_rules! http_created_json {
    ($object:expr) => {
        return Ok(actix_web::HttpResponse::Created().json($object));
    };
}

/// Answer the request with HTTP 200 and the object as response body
#[macro_export]
macro_rules! http_ok_json {
    ($object:expr) => {
        return Ok(actix_web::HttpResponse::Ok().json($object));
    };
}
