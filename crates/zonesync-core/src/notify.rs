//! NOTIFY wire-protocol contract (RFC 1996)
//!
//! Validation checks run in a fixed order and the first failing check
//! short-circuits with its reply code:
//!
//! | # | check                 | on failure |
//! |---|-----------------------|------------|
//! | 1 | opcode == NOTIFY      | REFUSED    |
//! | 2 | rcode  == NOERROR     | FORMERR    |
//! | 3 | exactly one question  | FORMERR    |
//! | 4 | question type == SOA  | FORMERR    |
//!
//! Replies echo the request's id, opcode and question. The AA flag is set
//! only on full acceptance.

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::RecordType;

use crate::error::Result;
use crate::zone::ZoneName;

/// Conventional non-extended DNS/UDP message size
pub const MAX_DATAGRAM: usize = 512;

/// Outcome of validating a decoded notification message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The message is a well-formed NOTIFY; the zone should be updated
    Accepted {
        /// Zone name from the single SOA question
        zone: ZoneName,
    },

    /// The message violates the protocol contract
    Rejected {
        /// Reply code to send back
        code: ResponseCode,
        /// What was wrong, for the log
        reason: String,
    },
}

/// Decode a raw datagram into a DNS message
pub fn decode(datagram: &[u8]) -> Result<Message> {
    Ok(Message::from_vec(datagram)?)
}

/// Encode a reply message back into wire bytes
pub fn encode(message: &Message) -> Result<Vec<u8>> {
    Ok(message.to_vec()?)
}

/// Apply the protocol contract to a decoded message
pub fn validate(message: &Message) -> ValidationOutcome {
    let opcode = message.op_code();
    if opcode != OpCode::Notify {
        return ValidationOutcome::Rejected {
            code: ResponseCode::Refused,
            reason: format!("expected opcode=NOTIFY, but was {opcode:?}"),
        };
    }

    let rcode = message.response_code();
    if rcode != ResponseCode::NoError {
        return ValidationOutcome::Rejected {
            code: ResponseCode::FormErr,
            reason: format!("expected rcode=NOERROR, but was {rcode}"),
        };
    }

    let queries = message.queries();
    if queries.len() != 1 {
        return ValidationOutcome::Rejected {
            code: ResponseCode::FormErr,
            reason: format!("expected question-len=1, but was {}", queries.len()),
        };
    }

    let question = &queries[0];
    if question.query_type() != RecordType::SOA {
        return ValidationOutcome::Rejected {
            code: ResponseCode::FormErr,
            reason: format!(
                "expected question to be SOA, but was {}",
                question.query_type()
            ),
        };
    }

    ValidationOutcome::Accepted {
        zone: ZoneName::new(question.name().to_utf8()),
    }
}

/// Build the reply to a notification message.
///
/// The reply echoes the request's id, opcode and question; `authoritative`
/// is set only on the acceptance path.
pub fn build_reply(request: &Message, code: ResponseCode, authoritative: bool) -> Message {
    let mut reply = Message::new();
    reply
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_response_code(code)
        .set_authoritative(authoritative)
        .add_queries(request.queries().iter().cloned());
    reply
}
