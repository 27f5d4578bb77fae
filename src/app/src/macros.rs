/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.error_message, None)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.panel_visible, true;
///     model.error_message, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

/// Macro for HTTP requests whose text body is handed back as a response event.
///
/// # Patterns
///
/// GET without body:
/// ```ignore
/// http_text!(get, STATUS_ENDPOINT, StatusResponse, "Refresh status")
/// ```
///
/// POST with form-encoded body (evaluates to a `Result` of the command, since
/// encoding the body can fail):
/// ```ignore
/// http_text!(post, UPDATE_ENDPOINT, UpdateResponse, "Save settings", body_form: &update)
/// ```
#[macro_export]
macro_rules! http_text {
    (get, $endpoint:expr, $response_event:ident, $action:expr) => {
        $crate::HttpCmd::get($crate::build_url($endpoint))
            .build()
            .then_send(|result| {
                $crate::events::Event::$response_event($crate::process_text_response(
                    $action, result,
                ))
            })
    };

    (post, $endpoint:expr, $response_event:ident, $action:expr, body_form: $body:expr) => {
        $crate::HttpCmd::post($crate::build_url($endpoint))
            .body_form($body)
            .map(|builder| {
                builder.build().then_send(|result| {
                    $crate::events::Event::$response_event($crate::process_text_response(
                        $action, result,
                    ))
                })
            })
    };
}
