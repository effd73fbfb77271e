//! Collapsing runs of identical captions into groups.

use crate::srt::Caption;

use log::debug;

/// A run of consecutive captions sharing the same plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub plain_text: String,
    /// Earliest start among the members.
    pub anchor_start: f64,
    /// Never empty.
    pub members: Vec<Caption>,
    /// Position of this group in the track's group sequence.
    pub index: usize,
}

impl Group {
    pub fn first(&self) -> &Caption {
        &self.members[0]
    }

    pub fn last(&self) -> &Caption {
        &self.members[self.members.len() - 1]
    }
}

/// Groups captions in a single left-to-right pass. A new group opens whenever
/// a caption's plain text differs from the caption right before it.
pub fn build_groups(captions: &[Caption]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut previous: Option<&Caption> = None;

    for caption in captions {
        let same_run = previous.map_or(false, |p| p.plain_text == caption.plain_text);
        let open = if same_run { groups.last_mut() } else { None };
        if let Some(group) = open {
            group.anchor_start = group.anchor_start.min(caption.start);
            group.members.push(caption.clone());
        } else {
            groups.push(Group {
                plain_text: caption.plain_text.clone(),
                anchor_start: caption.start,
                members: vec![caption.clone()],
                index: 0,
            });
        }
        previous = Some(caption);
    }

    for (index, group) in groups.iter_mut().enumerate() {
        group.index = index;
    }
    groups
}

/// A parsed subtitle track together with its groups. Immutable once built;
/// loading another track means building a new `Track`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    captions: Vec<Caption>,
    groups: Vec<Group>,
}

impl Track {
    pub fn new(captions: Vec<Caption>) -> Self {
        let groups = build_groups(&captions);
        debug!(
            "Built {} groups from {} captions",
            groups.len(),
            captions.len()
        );
        Self { captions, groups }
    }

    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// The first caption whose interval contains `time`.
    pub fn caption_at(&self, time: f64) -> Option<(usize, &Caption)> {
        self.captions
            .iter()
            .enumerate()
            .find(|(_, caption)| caption.contains(time))
    }

    /// Resolves the group a caption belongs to by nearest anchor: of all groups
    /// with the caption's plain text, the one whose anchor is closest to the
    /// caption's start. Ties go to the earliest group.
    pub fn resolve_group(&self, caption: &Caption) -> Option<&Group> {
        let mut best: Option<(&Group, f64)> = None;
        for group in self
            .groups
            .iter()
            .filter(|g| g.plain_text == caption.plain_text)
        {
            let distance = (group.anchor_start - caption.start).abs();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((group, distance)),
            }
        }
        best.map(|(group, _)| group)
    }

    /// The end of the last caption, or zero for an empty track.
    pub fn duration(&self) -> f64 {
        self.captions.iter().map(|c| c.end).fold(0.0, f64::max)
    }
}
