//! Compiled rule sets as checksummed binary blobs.
//!
//! A blob is a fixed 32-byte header followed by a bincode payload. The
//! header carries the payload length and a truncated BLAKE3 hash of the
//! payload; a blob with a different format version is rejected before the
//! payload is touched.
//!
//! ```text
//! bytes   field
//! 0..4    magic b"WRUL"
//! 4..6    format version, u16 LE
//! 6..8    writer version, u16 LE (not checked)
//! 8..12   reserved, zero
//! 12..16  payload length, u32 LE
//! 16..32  BLAKE3(payload)[..16]
//! 32..    payload
//! ```
//!
//! The payload may also embed a BLAKE3 digest of the rule source; see
//! [`RuleSet::from_bytes_for_source`](crate::RuleSet::from_bytes_for_source).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    CompiledRule, Node, NodeCollection, Operand, Operator, Rule, RuleEntry, RuleSet, Term,
};

const MAGIC: &[u8; 4] = b"WRUL";
const FORMAT_VERSION: u16 = 1;
const WRITER_VERSION: u16 = 1;
const HEADER_SIZE: usize = 32;

/// Failure to turn a [`RuleSet`](crate::RuleSet) into a blob.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("cannot encode rule set: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("encoded rule set is {0} bytes, more than a blob can hold")]
    TooLarge(usize),

    #[error("cannot write rule set: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to restore a [`RuleSet`](crate::RuleSet) from a blob.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("missing WRUL magic bytes")]
    BadMagic,

    #[error("blob has format version {found}, expected {expected}")]
    IncompatibleVersion { found: u16, expected: u16 },

    #[error("payload checksum does not match header")]
    ChecksumMismatch,

    #[error("blob truncated: need {needed} bytes, found {found}")]
    Truncated { needed: usize, found: usize },

    #[error("cannot decode payload: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("invalid rule set: {0}")]
    Validation(String),

    #[error("cached rule set was not built from the current source")]
    StaleSource,

    #[error("cannot read rule set: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct SerializedRuleSet {
    metadata: RuleSetMetadata,
    rules: Vec<SerializedRule>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RuleSetMetadata {
    rule_count: usize,
    node_count: usize,
    source_digest: Option<[u8; 32]>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedRule {
    id: i32,
    priority: i32,
    text: String,
    root: usize,
    nodes: Vec<Vec<SerializedTerm>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SerializedTerm {
    or: bool,
    negated: bool,
    operand: SerializedOperand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum SerializedOperand {
    Word(String),
    Node(usize),
}

impl From<&Term> for SerializedTerm {
    fn from(term: &Term) -> Self {
        Self {
            or: term.operator == Operator::Or,
            negated: term.negated,
            operand: match &term.operand {
                Operand::Word(word) => SerializedOperand::Word(word.clone()),
                Operand::Node(index) => SerializedOperand::Node(*index),
            },
        }
    }
}

impl From<SerializedTerm> for Term {
    fn from(term: SerializedTerm) -> Self {
        Self {
            operator: if term.or { Operator::Or } else { Operator::And },
            negated: term.negated,
            operand: match term.operand {
                SerializedOperand::Word(word) => Operand::Word(word),
                SerializedOperand::Node(index) => Operand::Node(index),
            },
        }
    }
}

impl From<&RuleEntry> for SerializedRule {
    fn from(entry: &RuleEntry) -> Self {
        Self {
            id: entry.rule.id,
            priority: entry.rule.priority,
            text: entry.rule.text.clone(),
            root: entry.compiled.root,
            nodes: entry
                .compiled
                .nodes
                .iter()
                .map(|node| node.terms().iter().map(SerializedTerm::from).collect())
                .collect(),
        }
    }
}

impl From<SerializedRule> for RuleEntry {
    fn from(rule: SerializedRule) -> Self {
        let nodes = rule
            .nodes
            .into_iter()
            .map(|terms| Node::new(terms.into_iter().map(Term::from).collect()))
            .collect();
        Self {
            rule: Rule::new(rule.id, rule.priority, rule.text),
            compiled: CompiledRule::new(NodeCollection::from_nodes(nodes), rule.root),
        }
    }
}

fn ruleset_to_serialized(ruleset: &RuleSet, source_text: Option<&str>) -> SerializedRuleSet {
    let rules: Vec<SerializedRule> = ruleset.rules.iter().map(SerializedRule::from).collect();
    SerializedRuleSet {
        metadata: RuleSetMetadata {
            rule_count: rules.len(),
            node_count: rules.iter().map(|r| r.nodes.len()).sum(),
            source_digest: source_text.map(|text| *blake3::hash(text.as_bytes()).as_bytes()),
        },
        rules,
    }
}

fn serialized_to_ruleset(ser: SerializedRuleSet) -> Result<RuleSet, DeserializeError> {
    ser.check()?;
    let mut ruleset =
        RuleSet::from_compiled(ser.rules.into_iter().map(RuleEntry::from).collect());
    ruleset.source_digest = ser.metadata.source_digest;
    Ok(ruleset)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(message: String) -> DeserializeError {
    DeserializeError::Validation(message)
}

impl SerializedRuleSet {
    /// Reject payloads the compiler could not have produced.
    fn check(&self) -> Result<(), DeserializeError> {
        let nodes: usize = self.rules.iter().map(|r| r.nodes.len()).sum();
        if self.metadata.rule_count != self.rules.len() || self.metadata.node_count != nodes {
            return Err(invalid(format!(
                "header counts {} rules / {} nodes, payload holds {} / {nodes}",
                self.metadata.rule_count,
                self.metadata.node_count,
                self.rules.len(),
            )));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id) {
                return Err(invalid(format!("rule {} appears twice", rule.id)));
            }
            rule.check()?;
        }

        if let Some(pair) = self
            .rules
            .windows(2)
            .find(|pair| pair[0].priority > pair[1].priority)
        {
            return Err(invalid(format!(
                "rule {} (priority {}) stored after rule {} (priority {})",
                pair[1].id, pair[1].priority, pair[0].id, pair[0].priority
            )));
        }
        Ok(())
    }
}

impl SerializedRule {
    fn check(&self) -> Result<(), DeserializeError> {
        let id = self.id;
        if self.root >= self.nodes.len() {
            return Err(invalid(format!(
                "rule {id}: root #{} but only {} nodes",
                self.root,
                self.nodes.len()
            )));
        }
        for (index, terms) in self.nodes.iter().enumerate() {
            if terms.is_empty() {
                return Err(invalid(format!("rule {id}: node #{index} is empty")));
            }
            for term in terms {
                match &term.operand {
                    SerializedOperand::Node(target) if *target >= index => {
                        return Err(invalid(format!(
                            "rule {id}: node #{index} refers forward to #{target}"
                        )));
                    }
                    SerializedOperand::Word(word)
                        if word.is_empty() || *word != word.to_uppercase() =>
                    {
                        return Err(invalid(format!("rule {id}: bad word '{word}'")));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    format_version: u16,
    payload_len: u32,
    checksum: [u8; 16],
}

impl Header {
    fn for_payload(payload: &[u8]) -> Result<Self, SerializeError> {
        let payload_len =
            u32::try_from(payload.len()).map_err(|_| SerializeError::TooLarge(payload.len()))?;
        let mut checksum = [0u8; 16];
        checksum.copy_from_slice(&blake3::hash(payload).as_bytes()[..16]);
        Ok(Self {
            format_version: FORMAT_VERSION,
            payload_len,
            checksum,
        })
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&self.format_version.to_le_bytes());
        out.extend_from_slice(&WRITER_VERSION.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&self.payload_len.to_le_bytes());
        out.extend_from_slice(&self.checksum);
    }

    /// Split `bytes` into the parsed header and everything after it.
    fn read_from(bytes: &[u8]) -> Result<(Self, &[u8]), DeserializeError> {
        let Some((head, rest)) = bytes.split_first_chunk::<HEADER_SIZE>() else {
            return Err(DeserializeError::Truncated {
                needed: HEADER_SIZE,
                found: bytes.len(),
            });
        };
        if head[..4] != MAGIC[..] {
            return Err(DeserializeError::BadMagic);
        }
        let header = Self {
            format_version: u16::from_le_bytes([head[4], head[5]]),
            payload_len: u32::from_le_bytes([head[12], head[13], head[14], head[15]]),
            checksum: {
                let mut checksum = [0u8; 16];
                checksum.copy_from_slice(&head[16..]);
                checksum
            },
        };
        Ok((header, rest))
    }
}

// ---------------------------------------------------------------------------
// Public encode/decode
// ---------------------------------------------------------------------------

pub(crate) fn encode(
    ruleset: &RuleSet,
    source_text: Option<&str>,
) -> Result<Vec<u8>, SerializeError> {
    let payload = bincode::serde::encode_to_vec(
        ruleset_to_serialized(ruleset, source_text),
        bincode::config::standard(),
    )?;
    let header = Header::for_payload(&payload)?;

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    header.write_to(&mut out);
    out.extend_from_slice(&payload);
    Ok(out)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<RuleSet, DeserializeError> {
    let (header, rest) = Header::read_from(bytes)?;

    if header.format_version != FORMAT_VERSION {
        return Err(DeserializeError::IncompatibleVersion {
            found: header.format_version,
            expected: FORMAT_VERSION,
        });
    }

    let payload = rest
        .get(..header.payload_len as usize)
        .ok_or(DeserializeError::Truncated {
            needed: HEADER_SIZE + header.payload_len as usize,
            found: bytes.len(),
        })?;

    if blake3::hash(payload).as_bytes()[..16] != header.checksum {
        return Err(DeserializeError::ChecksumMismatch);
    }

    let (serialized, _): (SerializedRuleSet, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())?;
    serialized_to_ruleset(serialized)
}
