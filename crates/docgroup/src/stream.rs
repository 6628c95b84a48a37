//! The tree algebra over serialized documents, without building trees.
//!
//! Events are paired with positions: a start event reports the current
//! position and then descends, an end event climbs back to its element's
//! position and then steps to the next sibling. Two positioned streams are
//! merged in document order, where the end of an element sorts after all of
//! its descendants. Events at the same key are combined, all others are
//! copied through.
//!
//! Output is written as soon as a node is known to survive. A node survives
//! when its content is not the identity, when one of its children survives,
//! or when a later sibling survives. Unit leaves are therefore held in their
//! parent's pending list until a later sibling commits them or the parent
//! ends and drops them, which reproduces the tree algebra's trailing-unit
//! stripping.

use crate::element::{
    EqualityOptions, add_elements, check_start, equal_elements, is_unit_content, is_unit_start,
};
use crate::error::AlgebraError;
use crate::position::Position;
use crate::text::{add_text, check_text, is_blank, text_equal};
use markup::serialize::{
    is_self_closing, write_end_tag, write_start_tag, write_tag_head, write_text,
};
use markup::{Attributes, Element, EventReader, ParseConfig, ParseError, XmlEvent};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::Write;

/// Pairs each event with the position of its element.
pub struct Positioned<I> {
    events: I,
    path: Position,
}

impl<I> Positioned<I> {
    pub fn new(events: I) -> Self {
        Self {
            events,
            path: Position::root(),
        }
    }
}

impl<I> Iterator for Positioned<I>
where
    I: Iterator<Item = Result<XmlEvent, ParseError>>,
{
    type Item = Result<(Position, XmlEvent), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = match self.events.next()? {
            Ok(event) => event,
            Err(err) => return Some(Err(err)),
        };
        let position = if event.is_start() {
            let position = self.path.clone();
            self.path.push(1);
            position
        } else {
            self.path.pop();
            let position = self.path.clone();
            self.path.increment_last();
            position
        };
        Some(Ok((position, event)))
    }
}

struct PruneFrame {
    /// Index of the start event in `held` while the node is undecided.
    start: usize,
    committed: bool,
}

/// Drops the subtrees that tree addition would strip as trailing unit
/// nodes, so a stream compares like the normalized tree it describes.
/// Events are held back until their node is known to survive.
struct Pruned<I> {
    events: I,
    held: Vec<(Position, XmlEvent)>,
    ready: VecDeque<(Position, XmlEvent)>,
    frames: Vec<PruneFrame>,
}

impl<I> Pruned<I> {
    fn new(events: I) -> Self {
        Self {
            events,
            held: Vec::new(),
            ready: VecDeque::new(),
            frames: Vec::new(),
        }
    }

    fn release(&mut self) {
        self.ready.extend(self.held.drain(..));
        for frame in &mut self.frames {
            frame.committed = true;
        }
    }

    fn push(&mut self, position: Position, event: XmlEvent) {
        let (is_start, keeps_node) = match &event {
            XmlEvent::Start {
                name,
                attributes,
                text,
            } => (true, !is_unit_start(name, attributes, text.as_deref())),
            XmlEvent::End { tail, .. } => (false, !is_blank(tail.as_deref())),
        };
        if is_start {
            if keeps_node {
                self.release();
                self.frames.push(PruneFrame {
                    start: 0,
                    committed: true,
                });
                self.ready.push_back((position, event));
            } else {
                self.frames.push(PruneFrame {
                    start: self.held.len(),
                    committed: false,
                });
                self.held.push((position, event));
            }
            return;
        }
        let Some(frame) = self.frames.pop() else {
            return;
        };
        if frame.committed {
            // Whatever is still held are trailing unit leaves inside this node.
            self.held.clear();
            self.ready.push_back((position, event));
        } else if keeps_node || self.frames.is_empty() {
            self.release();
            self.ready.push_back((position, event));
        } else {
            self.held.truncate(frame.start + 1);
            self.held.push((position, event));
        }
    }
}

impl<I> Iterator for Pruned<I>
where
    I: Iterator<Item = Result<(Position, XmlEvent), ParseError>>,
{
    type Item = Result<(Position, XmlEvent), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.ready.pop_front() {
                return Some(Ok(item));
            }
            match self.events.next()? {
                Ok((position, event)) => self.push(position, event),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

fn positioned(input: &str, config: ParseConfig) -> Positioned<EventReader<'_>> {
    Positioned::new(EventReader::new(input, config))
}

/// Element positions in document order.
pub fn ordering(input: &str) -> Result<Vec<Position>, AlgebraError> {
    ordering_with_config(input, ParseConfig::default())
}

pub fn ordering_with_config(input: &str, config: ParseConfig) -> Result<Vec<Position>, AlgebraError> {
    let mut positions = Vec::new();
    for item in positioned(input, config) {
        let (position, event) = item?;
        if event.is_start() {
            positions.push(position);
        }
    }
    Ok(positions)
}

pub fn equal(a: &str, b: &str) -> Result<bool, AlgebraError> {
    equal_with_config(a, b, ParseConfig::default(), EqualityOptions::default())
}

/// Event-by-event comparison with trailing unit nodes left out; stops at the
/// first difference.
pub fn equal_with_config(
    a: &str,
    b: &str,
    config: ParseConfig,
    options: EqualityOptions,
) -> Result<bool, AlgebraError> {
    let mut left = Pruned::new(positioned(a, config));
    let mut right = Pruned::new(positioned(b, config));
    loop {
        let ((pa, ea), (pb, eb)) = match (left.next().transpose()?, right.next().transpose()?) {
            (None, None) => return Ok(true),
            (Some(x), Some(y)) => (x, y),
            _ => return Ok(false),
        };
        if pa != pb {
            log::trace!(target: "docgroup.stream", "streams differ in shape at {pa} / {pb}");
            return Ok(false);
        }
        let same = match (ea, eb) {
            (
                XmlEvent::Start {
                    name: na,
                    attributes: aa,
                    text: ta,
                },
                XmlEvent::Start {
                    name: nb,
                    attributes: ab,
                    text: tb,
                },
            ) => equal_elements(
                &Element {
                    name: na,
                    attributes: aa,
                    text: ta,
                    tail: None,
                },
                &Element {
                    name: nb,
                    attributes: ab,
                    text: tb,
                    tail: None,
                },
                options,
            ),
            (XmlEvent::End { tail: ta, .. }, XmlEvent::End { tail: tb, .. }) => {
                text_equal(ta.as_deref(), tb.as_deref())
            }
            _ => false,
        };
        if !same {
            log::trace!(target: "docgroup.stream", "streams differ in content at {pa}");
            return Ok(false);
        }
    }
}

/// The sum of two serialized documents, serialized.
pub fn add(a: &str, b: &str) -> Result<String, AlgebraError> {
    add_with_config(a, b, ParseConfig::default())
}

pub fn add_with_config(a: &str, b: &str, config: ParseConfig) -> Result<String, AlgebraError> {
    let mut out = String::with_capacity(a.len().max(b.len()));
    add_into_with_config(a, b, &mut out, config)?;
    Ok(out)
}

pub fn add_into<W: Write + ?Sized>(a: &str, b: &str, out: &mut W) -> Result<(), AlgebraError> {
    add_into_with_config(a, b, out, ParseConfig::default())
}

pub fn add_into_with_config<W: Write + ?Sized>(
    a: &str,
    b: &str,
    out: &mut W,
    config: ParseConfig,
) -> Result<(), AlgebraError> {
    let mut left = positioned(a, config);
    let mut right = positioned(b, config);
    let mut next_left = left.next().transpose()?;
    let mut next_right = right.next().transpose()?;
    let mut writer = SumWriter::new(out);

    loop {
        let order = match (&next_left, &next_right) {
            (None, None) => break,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((pa, ea)), Some((pb, eb))) => event_key_cmp(pa, ea, pb, eb),
        };
        let (event, position) = match order {
            Ordering::Less => {
                let Some((position, event)) = next_left.take() else { break };
                next_left = left.next().transpose()?;
                check_event(&event)?;
                (event, position)
            }
            Ordering::Greater => {
                let Some((position, event)) = next_right.take() else { break };
                next_right = right.next().transpose()?;
                check_event(&event)?;
                (event, position)
            }
            Ordering::Equal => {
                let (Some((position, ea)), Some((_, eb))) = (next_left.take(), next_right.take())
                else {
                    break;
                };
                next_left = left.next().transpose()?;
                next_right = right.next().transpose()?;
                (combine(ea, eb)?, position)
            }
        };
        log::trace!(target: "docgroup.stream", "{position}: {}", event.name());
        writer.event(event)?;
    }
    writer.finish()
}

/// Document order over events: an end event sorts after every descendant of
/// its element and before the next sibling.
fn event_key_cmp(pa: &Position, ea: &XmlEvent, pb: &Position, eb: &XmlEvent) -> Ordering {
    let key = |p: &Position, e: &XmlEvent| {
        p.as_slice()
            .iter()
            .copied()
            .chain((!e.is_start()).then_some(usize::MAX))
            .collect::<Vec<_>>()
    };
    key(pa, ea).cmp(&key(pb, eb))
}

/// Events only one side has are copied, so their symbols are checked here.
fn check_event(event: &XmlEvent) -> Result<(), AlgebraError> {
    match event {
        XmlEvent::Start {
            name,
            attributes,
            text,
        } => check_start(name, attributes, text.as_deref()),
        XmlEvent::End { tail, .. } => check_text(tail.as_deref()),
    }
}

fn combine(a: XmlEvent, b: XmlEvent) -> Result<XmlEvent, AlgebraError> {
    match (a, b) {
        (
            XmlEvent::Start {
                name,
                attributes,
                text,
            },
            XmlEvent::Start {
                name: other_name,
                attributes: other_attributes,
                text: other_text,
            },
        ) => {
            let sum = add_elements(
                &Element {
                    name,
                    attributes,
                    text,
                    tail: None,
                },
                &Element {
                    name: other_name,
                    attributes: other_attributes,
                    text: other_text,
                    tail: None,
                },
            )?;
            Ok(XmlEvent::Start {
                name: sum.name,
                attributes: sum.attributes,
                text: sum.text,
            })
        }
        (XmlEvent::End { name, tail }, XmlEvent::End { tail: other, .. }) => Ok(XmlEvent::End {
            name,
            tail: add_text(tail.as_deref(), other.as_deref())?,
        }),
        // Keys include the event kind, so equal keys never mix kinds.
        (a, _) => Ok(a),
    }
}

struct Frame {
    name: String,
    attributes: Attributes,
    text: Option<String>,
    unit: bool,
    committed: bool,
    /// `<name attrs` written, waiting for `>` or `/>`.
    tag_open: bool,
    /// Childless unit elements held back until a later sibling survives.
    pending: Vec<Element>,
}

struct SumWriter<'w, W: Write + ?Sized> {
    out: &'w mut W,
    frames: Vec<Frame>,
}

impl<'w, W: Write + ?Sized> SumWriter<'w, W> {
    fn new(out: &'w mut W) -> Self {
        Self {
            out,
            frames: Vec::new(),
        }
    }

    fn event(&mut self, event: XmlEvent) -> Result<(), AlgebraError> {
        match event {
            XmlEvent::Start {
                name,
                attributes,
                text,
            } => {
                let element = Element {
                    name,
                    attributes,
                    text,
                    tail: None,
                };
                let unit = is_unit_content(&element);
                self.frames.push(Frame {
                    name: element.name,
                    attributes: element.attributes,
                    text: element.text,
                    unit,
                    committed: false,
                    tag_open: false,
                    pending: Vec::new(),
                });
                if !unit {
                    self.commit(self.frames.len() - 1)?;
                }
                Ok(())
            }
            XmlEvent::End { tail, .. } => self.end(tail),
        }
    }

    /// Write the frame's start tag along with everything before it: the
    /// uncommitted ancestors and the leaves pending in its parent.
    fn commit(&mut self, index: usize) -> Result<(), AlgebraError> {
        let first = self.frames[..=index]
            .iter()
            .rposition(|frame| frame.committed)
            .map_or(0, |i| i + 1);
        for i in first..=index {
            if i > 0 {
                self.flush_pending(i - 1)?;
                self.close_start_tag(i - 1)?;
            }
            let frame = &mut self.frames[i];
            write_tag_head(self.out, &frame.name, &frame.attributes)?;
            frame.committed = true;
            if frame.text.as_deref().is_none_or(str::is_empty) {
                // `>` or `/>` depends on whether any child survives.
                frame.tag_open = true;
            } else {
                self.out.write_char('>')?;
                write_text(self.out, frame.text.as_deref())?;
            }
        }
        Ok(())
    }

    fn close_start_tag(&mut self, index: usize) -> Result<(), AlgebraError> {
        let frame = &mut self.frames[index];
        if frame.tag_open {
            self.out.write_char('>')?;
            frame.tag_open = false;
        }
        Ok(())
    }

    fn flush_pending(&mut self, index: usize) -> Result<(), AlgebraError> {
        if self.frames[index].pending.is_empty() {
            return Ok(());
        }
        self.close_start_tag(index)?;
        let pending = std::mem::take(&mut self.frames[index].pending);
        for element in pending {
            let self_closing = is_self_closing(&element, false);
            write_start_tag(self.out, &element.name, &element.attributes, self_closing)?;
            if !self_closing {
                write_text(self.out, element.text.as_deref())?;
                write_end_tag(self.out, &element.name)?;
            }
            write_text(self.out, element.tail.as_deref())?;
        }
        Ok(())
    }

    fn end(&mut self, tail: Option<String>) -> Result<(), AlgebraError> {
        let Some(frame) = self.frames.last() else {
            return Ok(());
        };
        let index = self.frames.len() - 1;
        // The root always survives.
        if !frame.committed && (index == 0 || !is_blank(tail.as_deref())) {
            self.commit(index)?;
        }

        let Some(frame) = self.frames.pop() else {
            return Ok(());
        };
        if !frame.pending.is_empty() {
            log::debug!(
                target: "docgroup.stream",
                "dropping {} trailing unit nodes in {}",
                frame.pending.len(),
                frame.name
            );
        }
        if !frame.committed {
            debug_assert!(frame.unit);
            if let Some(parent) = self.frames.last_mut() {
                parent.pending.push(Element {
                    name: frame.name,
                    attributes: frame.attributes,
                    text: frame.text,
                    tail,
                });
            }
            return Ok(());
        }
        if frame.tag_open {
            self.out.write_str("/>")?;
        } else {
            write_end_tag(self.out, &frame.name)?;
        }
        write_text(self.out, tail.as_deref())?;
        Ok(())
    }

    fn finish(self) -> Result<(), AlgebraError> {
        debug_assert!(self.frames.is_empty());
        Ok(())
    }
}
