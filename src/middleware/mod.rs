use actix_cors::Cors;

/// CORS liberado para qualquer origem e qualquer header pedido no pre-flight
/// (o cliente web manda authorization, x-client-info, apikey e content-type,
/// mas SDKs adicionam outros)
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
