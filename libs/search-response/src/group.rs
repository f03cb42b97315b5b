//! Grouped results from the `grouped` section.
//!
//! One [`GroupCommand`] per requested grouping (field, function or query),
//! each holding its groups in payload order. The layout of every command and
//! group entry is inferred from its keys:
//!
//! - a command with `groups` lists explicit groups;
//! - a command with only `doclist` (simple format, query grouping) is a
//!   single implicit group named after the command;
//! - a group entry with `matches` is itself a command, nested one level down;
//! - a group entry with `doclist` holds documents, labelled by `groupValue`
//!   when that key is present and by the command name otherwise.

use crate::config::DecoderConfig;
use crate::decode::{EntryReader, named_entries};
use crate::document::{DocumentList, decode_document_list};
use crate::error::DecodeError;
use crate::keys;
use crate::named_list::{NamedList, Value};

/// All grouping commands of a response, in request order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupResponse {
    commands: Vec<GroupCommand>,
}

impl GroupResponse {
    #[must_use]
    pub fn new(commands: Vec<GroupCommand>) -> Self {
        Self { commands }
    }

    #[must_use]
    pub fn values(&self) -> &[GroupCommand] {
        &self.commands
    }

    /// Command with the given name.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&GroupCommand> {
        self.commands.iter().find(|c| c.name == name)
    }
}

/// Result of one grouping request.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupCommand {
    name: String,
    matches: i64,
    ngroups: Option<i64>,
    groups: Vec<Group>,
}

impl GroupCommand {
    #[must_use]
    pub fn new(name: impl Into<String>, matches: i64, ngroups: Option<i64>, groups: Vec<Group>) -> Self {
        Self {
            name: name.into(),
            matches,
            ngroups,
            groups,
        }
    }

    /// Field name, function expression or query the grouping was requested on.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documents matched across all groups.
    #[must_use]
    pub fn matches(&self) -> i64 {
        self.matches
    }

    /// Number of distinct groups; `None` unless the server was asked for it.
    #[must_use]
    pub fn ngroups(&self) -> Option<i64> {
        self.ngroups
    }

    #[must_use]
    pub fn values(&self) -> &[Group] {
        &self.groups
    }
}

/// One group: its value label and its result.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    group_value: Option<String>,
    result: GroupResult,
}

impl Group {
    #[must_use]
    pub fn new(group_value: Option<String>, result: GroupResult) -> Self {
        Self {
            group_value,
            result,
        }
    }

    /// Group label. `None` is the group of documents without a value.
    #[must_use]
    pub fn group_value(&self) -> Option<&str> {
        self.group_value.as_deref()
    }

    #[must_use]
    pub fn result(&self) -> &GroupResult {
        &self.result
    }

    /// Documents of this group, unless it holds a nested command.
    #[must_use]
    pub fn documents(&self) -> Option<&DocumentList> {
        match &self.result {
            GroupResult::Documents(docs) => Some(docs),
            GroupResult::Nested(_) => None,
        }
    }
}

/// What a group contains.
#[derive(Clone, Debug, PartialEq)]
pub enum GroupResult {
    Documents(DocumentList),
    /// A group-within-group: the nested command and its groups.
    Nested(GroupCommand),
}

pub(crate) fn decode_group_response(
    section: &NamedList,
    config: &DecoderConfig,
) -> Result<GroupResponse, DecodeError> {
    let commands = named_entries(keys::GROUPED, section)
        .map(|reader| {
            let reader = reader?;
            decode_command(&reader, reader.entry(), 0, config)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(GroupResponse::new(commands))
}

/// Decode one command entry. Nested commands are named after the group that
/// holds them, or after the enclosing command when that group has a null value.
fn decode_command(
    reader: &EntryReader<'_>,
    name: &str,
    depth: usize,
    config: &DecoderConfig,
) -> Result<GroupCommand, DecodeError> {
    if depth >= config.max_group_depth {
        return Err(DecodeError::TooDeep {
            section: reader.section(),
            entry: reader.entry().to_owned(),
            limit: config.max_group_depth,
        });
    }

    let matches = reader.i64(keys::MATCHES)?;
    let ngroups = reader.opt_i64(keys::NGROUPS)?;

    let groups = if let Some(groups) = reader.get(keys::GROUPS) {
        let entries = groups
            .as_list()
            .ok_or_else(|| reader.invalid(keys::GROUPS, "list of groups", groups))?;
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| decode_group(reader, name, i, entry, depth, config))
            .collect::<Result<Vec<_>, _>>()?
    } else if let Some(doclist) = reader.get(keys::DOCLIST) {
        let docs = decode_document_list(reader.section(), reader.entry(), keys::DOCLIST, doclist)?;
        vec![Group::new(Some(name.to_owned()), GroupResult::Documents(docs))]
    } else {
        return Err(reader.unrecognized("group command has neither `groups` nor `doclist`"));
    };

    Ok(GroupCommand::new(name, matches, ngroups, groups))
}

fn decode_group(
    command: &EntryReader<'_>,
    command_name: &str,
    index: usize,
    entry: &Value,
    depth: usize,
    config: &DecoderConfig,
) -> Result<Group, DecodeError> {
    let map = entry
        .as_named_list()
        .ok_or_else(|| command.invalid(format!("{}[{index}]", keys::GROUPS), "group", entry))?;

    let location = format!("{}/{}[{index}]", command.entry(), keys::GROUPS);
    let reader = EntryReader::new(command.section(), &location, map);

    let group_value = match map.get(keys::GROUP_VALUE) {
        None => Some(command_name.to_owned()),
        Some(Value::Null) => None,
        Some(value) => Some(
            value
                .to_label()
                .ok_or_else(|| reader.invalid(keys::GROUP_VALUE, "scalar", value))?,
        ),
    };

    if reader.has(keys::MATCHES) {
        let name = group_value.as_deref().unwrap_or(command_name);
        let nested = decode_command(&reader, name, depth + 1, config)?;
        return Ok(Group::new(group_value, GroupResult::Nested(nested)));
    }

    match reader.get(keys::DOCLIST) {
        Some(doclist) => {
            let docs = decode_document_list(reader.section(), &location, keys::DOCLIST, doclist)?;
            Ok(Group::new(group_value, GroupResult::Documents(docs)))
        }
        None => Err(reader.unrecognized("group has neither `doclist` nor a nested command")),
    }
}
