use utoipa::OpenApi;

use crate::routes::{convert, health};

#[derive(OpenApi)]
#[openapi(info(
    title = "mdexport-server",
    description = "Convert markdown to md, docx or pdf through pandoc",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(convert::ConvertApi::openapi());
    root
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn documents_both_endpoints() {
        let doc = get_docs();
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/convert"));

        let schemas = &doc.components.expect("components").schemas;
        assert!(schemas.contains_key("ConvertRequest"));
        assert!(schemas.contains_key("ConversionFormat"));
    }
}
