use csrkit::builder::RequestBuilder;
use csrkit::request::subject::SubjectAttributes;

pub fn example_subject() -> SubjectAttributes {
    SubjectAttributes::builder()
        .country("US")
        .state("California")
        .locality("San Francisco")
        .organization("Example Corp")
        .organizational_unit("IT")
        .common_name("example.com")
        .email("admin@example.com")
        .build()
}

pub fn example_builder() -> RequestBuilder {
    RequestBuilder::new(example_subject())
}

#[allow(dead_code)]
pub fn pem_str(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).expect("PEM output is ASCII")
}
