use super::{Answer, Question};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// TTL applied to NXDOMAIN and empty answers when they are cached.
pub const NEGATIVE_CACHE_TTL: u32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Unknown(u16),
}

impl ResponseCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NxDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Unknown(_) => "UNKNOWN",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NxDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Unknown(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NxDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Unknown(other),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Unknown(code) => write!(f, "RCODE{}", code),
            other => f.write_str(other.as_str()),
        }
    }
}

/// A decoded DNS response.
///
/// Responses are shared by value: the pipeline clones one before overriding
/// its rcode or answers, so a cached copy is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: u16,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub rcode: ResponseCode,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
}

impl Response {
    pub fn new(id: u16, question: Question, rcode: ResponseCode, answers: Vec<Answer>) -> Self {
        Self {
            id,
            recursion_desired: true,
            recursion_available: true,
            rcode,
            questions: vec![question],
            answers,
        }
    }

    /// A response carrying only an error code, used for SERVFAIL/FORMERR replies.
    pub fn error(id: u16, question: Option<Question>, rcode: ResponseCode) -> Self {
        Self {
            id,
            recursion_desired: true,
            recursion_available: true,
            rcode,
            questions: question.into_iter().collect(),
            answers: Vec::new(),
        }
    }

    pub fn question(&self) -> Option<&Question> {
        self.questions.first()
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NxDomain
    }

    pub fn min_answer_ttl(&self) -> Option<u32> {
        self.answers.iter().map(|answer| answer.ttl).min()
    }

    /// TTL used when writing this response to the answer cache.
    ///
    /// NXDOMAIN and empty answer sets are held for [`NEGATIVE_CACHE_TTL`];
    /// otherwise the smallest answer TTL wins. A result of 0 means the
    /// response must not be cached.
    pub fn cache_ttl(&self) -> u32 {
        if self.is_nxdomain() || self.answers.is_empty() {
            return NEGATIVE_CACHE_TTL;
        }
        self.min_answer_ttl().unwrap_or(0)
    }

    /// Copy of this response rewritten as NXDOMAIN with no answers.
    pub fn restricted(&self) -> Response {
        Response {
            rcode: ResponseCode::NxDomain,
            answers: Vec::new(),
            ..self.clone()
        }
    }

    pub fn with_id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    /// Puts the client's spelling of the question name back, so resolvers
    /// that randomise letter case (DNS 0x20) accept the reply. Names that do
    /// not match case-insensitively are left alone.
    pub fn with_question_name(mut self, name: &str) -> Self {
        if let Some(question) = self.questions.first_mut() {
            if question.name.eq_ignore_ascii_case(name) {
                question.name = Arc::from(name);
            }
        }
        self
    }

    /// Caps every answer TTL at `ttl`.
    pub fn with_ttl_ceiling(mut self, ttl: u32) -> Self {
        for answer in &mut self.answers {
            answer.ttl = answer.ttl.min(ttl);
        }
        self
    }
}
