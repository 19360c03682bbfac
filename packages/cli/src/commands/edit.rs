use super::Context;
use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use pagewright_common::{PropValue, Props, Style};
use pagewright_content::{load_registry, open_session, publish};
use pagewright_editor::{mutations, EditSession, EditorAction};
use pagewright_schema::{coerce, SchemaRegistry};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Page to edit
    pub page: String,

    #[command(subcommand)]
    pub op: EditOp,
}

#[derive(Debug, Subcommand)]
pub enum EditOp {
    /// Add a component (as a new root unless --parent is given)
    Add {
        component_type: String,

        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Remove a node and its children
    Remove { node_id: String },

    /// Copy a node (with fresh ids) right after itself
    Duplicate { node_id: String },

    /// Set one prop, coerced to the type its schema declares
    SetProp {
        node_id: String,
        key: String,
        value: String,
    },

    /// Set one style property; an empty value removes it
    SetStyle {
        node_id: String,
        key: String,
        value: String,
    },
}

pub async fn edit(args: EditArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store();
    let registry = load_registry(&store).await?;
    let mut session = open_session(&store, &args.page, ctx.config.history_limit).await?;

    let summary = apply_op(&mut session, args.op, &registry)?;

    if !session.is_dirty() {
        println!("{} Nothing changed", "•".dimmed());
        return Ok(());
    }

    publish(&mut session, &store).await?;
    println!("{} {}", "✓".green(), summary);
    Ok(())
}

/// Run one edit through the session; returns a human summary
fn apply_op(session: &mut EditSession, op: EditOp, registry: &SchemaRegistry) -> Result<String> {
    match op {
        EditOp::Add {
            component_type,
            parent,
        } => {
            let id = session.add_component(&component_type, parent.as_deref(), registry)?;
            Ok(format!("Added {} {}", component_type, id.bright_white()))
        }

        EditOp::Remove { node_id } => {
            require_node(session, &node_id)?;
            session.dispatch(EditorAction::Delete(Some(node_id.clone())), registry)?;
            Ok(format!("Removed {}", node_id))
        }

        EditOp::Duplicate { node_id } => {
            require_node(session, &node_id)?;
            let copy = session.duplicate(&node_id).unwrap_or_default();
            Ok(format!("Duplicated {} as {}", node_id, copy.bright_white()))
        }

        EditOp::SetProp {
            node_id,
            key,
            value,
        } => {
            let value = coerce_prop(session, registry, &node_id, &key, &value)?;
            session.select(Some(node_id.as_str()));
            let props = Props::from([(key.clone(), value.clone())]);
            session.dispatch(EditorAction::SetProps(props), registry)?;
            Ok(format!("Set {}.{} = {}", node_id, key, value))
        }

        EditOp::SetStyle {
            node_id,
            key,
            value,
        } => {
            require_node(session, &node_id)?;
            session.select(Some(node_id.as_str()));
            let style = Style::from([(key.clone(), value.clone())]);
            session.dispatch(EditorAction::SetStyle(style), registry)?;
            if value.trim().is_empty() {
                Ok(format!("Cleared {} on {}", key, node_id))
            } else {
                Ok(format!("Set {} {}: {}", node_id, key, value))
            }
        }
    }
}

fn require_node(session: &EditSession, node_id: &str) -> Result<()> {
    if !mutations::contains_id(session.tree(), node_id) {
        bail!("No node with id '{}' on page {}", node_id, session.document().name);
    }
    Ok(())
}

/// Declared props use their schema type, anything else is read as JSON
/// and falls back to a plain string
fn coerce_prop(
    session: &EditSession,
    registry: &SchemaRegistry,
    node_id: &str,
    key: &str,
    raw: &str,
) -> Result<PropValue> {
    require_node(session, node_id)?;
    let declared = mutations::find_by_id(session.tree(), node_id)
        .and_then(|node| registry.get_component(&node.component_type))
        .and_then(|schema| schema.props.get(key));

    Ok(match declared {
        Some(prop) => prop.coerce(raw),
        None => coerce::infer(raw),
    })
}
