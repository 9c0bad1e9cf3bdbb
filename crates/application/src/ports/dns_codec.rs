use ndns_domain::{DomainError, Question, Response};

/// A decoded inbound query: the first question plus the header fields a
/// reply has to echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedQuery {
    pub id: u16,
    pub recursion_desired: bool,
    pub question: Question,
    /// The question name as the client spelled it, without the root dot.
    pub wire_name: String,
}

/// Conversion between DNS wire messages and the domain model.
///
/// Only the first question of a message is decoded. Implementations are pure
/// and may be shared freely between tasks.
pub trait DnsCodec: Send + Sync {
    fn decode_query(&self, bytes: &[u8]) -> Result<DecodedQuery, DomainError>;

    fn decode_response(&self, bytes: &[u8]) -> Result<Response, DomainError>;

    fn encode_query(&self, id: u16, question: &Question) -> Result<Vec<u8>, DomainError>;

    /// Fails with `EncodingError` when an answer's rdata does not match its
    /// declared record type.
    fn encode_response(&self, response: &Response) -> Result<Vec<u8>, DomainError>;

    fn decode(&self, bytes: &[u8]) -> Result<Question, DomainError> {
        self.decode_query(bytes).map(|query| query.question)
    }
}
