use super::rdata_map::{self, name_to_string, parse_name};
use super::record_type_map::{ClassMapper, RcodeMapper, RecordTypeMapper};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::Record;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use ndns_application::ports::{DecodedQuery, DnsCodec};
use ndns_domain::{Answer, DomainError, Question, Response};
use std::sync::Arc;
use tracing::debug;

/// Smallest buffer that still holds a full DNS header.
pub const DNS_HEADER_LEN: usize = 12;

pub struct HickoryCodec;

impl HickoryCodec {
    pub fn new() -> Self {
        Self
    }

    /// Reads the id out of a message whose body could not be decoded.
    pub fn header_id(bytes: &[u8]) -> Option<u16> {
        if bytes.len() < DNS_HEADER_LEN {
            return None;
        }
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn parse_message(bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(bytes)
            .map_err(|e| DomainError::MalformedPacket(format!("Failed to parse DNS message: {}", e)))
    }

    fn first_question(message: &Message) -> Result<Question, DomainError> {
        let query = message.queries().first().ok_or_else(|| {
            DomainError::MalformedPacket("DNS message carries no question".to_string())
        })?;
        if message.queries().len() > 1 {
            debug!(
                count = message.queries().len(),
                "Multi-question message, only the first question is used"
            );
        }
        Ok(Question::new(
            &query.name().to_ascii(),
            RecordTypeMapper::from_hickory(query.query_type()),
            ClassMapper::from_hickory(query.query_class()),
        ))
    }

    fn to_query(question: &Question) -> Result<Query, DomainError> {
        let mut query = Query::new();
        query.set_name(parse_name(&question.name)?);
        query.set_query_type(RecordTypeMapper::to_hickory(question.record_type));
        query.set_query_class(ClassMapper::to_hickory(question.class));
        Ok(query)
    }

    fn to_record(answer: &Answer) -> Result<Record, DomainError> {
        if !answer.is_consistent() {
            return Err(DomainError::EncodingError(format!(
                "Answer for {} declares {} but carries {} data",
                answer.name,
                answer.record_type,
                answer.rdata.record_type()
            )));
        }
        let rdata = rdata_map::to_hickory(&answer.rdata)?;
        let mut record = Record::from_rdata(parse_name(&answer.name)?, answer.ttl, rdata);
        record.set_dns_class(ClassMapper::to_hickory(answer.class));
        Ok(record)
    }

    fn from_record(record: &Record) -> Result<Answer, DomainError> {
        Ok(Answer {
            name: Arc::from(name_to_string(record.name())),
            record_type: RecordTypeMapper::from_hickory(record.record_type()),
            class: ClassMapper::from_hickory(record.dns_class()),
            ttl: record.ttl(),
            rdata: rdata_map::from_hickory(record.data())?,
        })
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::EncodingError(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}

impl Default for HickoryCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsCodec for HickoryCodec {
    fn decode_query(&self, bytes: &[u8]) -> Result<DecodedQuery, DomainError> {
        let message = Self::parse_message(bytes)?;
        let question = Self::first_question(&message)?;
        let wire_name = message
            .queries()
            .first()
            .map(|query| query.name().to_ascii().trim_end_matches('.').to_string())
            .unwrap_or_default();
        Ok(DecodedQuery {
            id: message.id(),
            recursion_desired: message.recursion_desired(),
            question,
            wire_name,
        })
    }

    fn decode_response(&self, bytes: &[u8]) -> Result<Response, DomainError> {
        let message = Self::parse_message(bytes)?;
        let questions = match message.queries().first() {
            Some(_) => vec![Self::first_question(&message)?],
            None => Vec::new(),
        };
        let answers = message
            .answers()
            .iter()
            .map(Self::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Response {
            id: message.id(),
            recursion_desired: message.recursion_desired(),
            recursion_available: message.recursion_available(),
            rcode: RcodeMapper::from_hickory(message.response_code()),
            questions,
            answers,
        })
    }

    fn encode_query(&self, id: u16, question: &Question) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(Self::to_query(question)?);
        Self::serialize_message(&message)
    }

    fn encode_response(&self, response: &Response) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::new();
        message
            .set_id(response.id)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(response.recursion_desired)
            .set_recursion_available(response.recursion_available)
            .set_response_code(RcodeMapper::to_hickory(response.rcode));

        for question in &response.questions {
            message.add_query(Self::to_query(question)?);
        }
        for answer in &response.answers {
            message.add_answer(Self::to_record(answer)?);
        }

        Self::serialize_message(&message)
    }
}
