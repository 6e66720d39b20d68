//! `p:timing` tree of a slide.
//!
//! A slide is in one of three timing states. Without animations or media
//! nothing is written. With media but no animations, every media shape
//! gets a click-to-play sequence and a media node, and videos also get a
//! click-to-pause trigger. With animations, each [`Animation`] becomes one
//! click step of the main sequence followed by the build list.
//!
//! Time node IDs come from one counter per slide starting at 1. Shape
//! targets are drawing object IDs resolved through [`SlideIdentifiers`].

use crate::common::xml::{Element, XmlWriter};
use crate::ooxml::error::Result;
use crate::ooxml::pptx::animations::Animation;
use crate::ooxml::pptx::config::WriterConfig;
use crate::ooxml::pptx::media::MediaType;
use crate::ooxml::pptx::slide::Slide;
use crate::ooxml::pptx::writer::relmap::SlideIdentifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimingState {
    Idle,
    MediaOnly,
    Animated,
}

impl TimingState {
    pub(crate) fn of(slide: &Slide) -> Self {
        if !slide.animations.is_empty() {
            TimingState::Animated
        } else if slide.has_media() {
            TimingState::MediaOnly
        } else {
            TimingState::Idle
        }
    }
}

/// Sequential time node ID allocator.
struct NodeIds(u32);

impl NodeIds {
    fn new() -> Self {
        Self(1)
    }

    fn next(&mut self) -> u32 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// A media shape among the direct children, with its drawing object ID.
struct MediaTarget {
    kind: MediaType,
    spid: u32,
}

pub(crate) fn write_timing(
    w: &mut XmlWriter,
    slide: &Slide,
    ids: &SlideIdentifiers,
    config: &WriterConfig,
) -> Result<()> {
    match TimingState::of(slide) {
        TimingState::Idle => Ok(()),
        TimingState::MediaOnly => {
            let media: Vec<MediaTarget> = slide
                .shapes
                .iter()
                .enumerate()
                .filter_map(|(index, shape)| {
                    shape.media().map(|(kind, _)| MediaTarget {
                        kind,
                        spid: ids.direct_drawing_id(index),
                    })
                })
                .collect();
            tracing::trace!(count = media.len(), "writing media timing");
            write_media_timing(w, &media, config);
            Ok(())
        },
        TimingState::Animated => {
            // Resolve every target before emitting anything.
            let targets = slide
                .animations
                .iter()
                .map(|animation| {
                    animation
                        .shapes()
                        .iter()
                        .map(|&hash| ids.require_drawing_id(hash))
                        .collect::<Result<Vec<u32>>>()
                })
                .collect::<Result<Vec<_>>>()?;
            write_animation_timing(w, &slide.animations, &targets);
            Ok(())
        },
    }
}

fn write_animation_timing(w: &mut XmlWriter, animations: &[Animation], targets: &[Vec<u32>]) {
    let mut node_ids = NodeIds::new();
    let mut timing = w.start("p:timing");
    {
        let mut tn_lst = timing.start("p:tnLst");
        let mut root = tn_lst.start("p:par");
        let mut root_ctn = start_root_ctn(&mut root, &mut node_ids);
        let mut root_children = root_ctn.start("p:childTnLst");
        let mut seq = root_children.start("p:seq");
        seq.attr("concurrent", "1").attr("nextAc", "seek");
        {
            let mut main_ctn = start_main_seq_ctn(&mut seq, &mut node_ids);
            let mut steps = main_ctn.start("p:childTnLst");
            for (animation, spids) in animations.iter().zip(targets) {
                write_animation_step(&mut steps, animation, spids, &mut node_ids);
            }
        }
        write_slide_conditions(&mut seq);
    }

    let mut bld_lst = timing.start("p:bldLst");
    for &spid in targets.iter().flatten() {
        bld_lst
            .start("p:bldP")
            .attr_int("spid", spid)
            .attr("grpId", "0");
    }
}

/// One click step: the outer click-gated `p:par`, the inner `p:par`, then
/// one effect node per target shape.
fn write_animation_step(
    w: &mut XmlWriter,
    animation: &Animation,
    spids: &[u32],
    node_ids: &mut NodeIds,
) {
    let mut outer = w.start("p:par");
    let mut outer_ctn = start_hold_ctn(&mut outer, node_ids, "indefinite");
    let mut outer_children = outer_ctn.start("p:childTnLst");
    let mut inner = outer_children.start("p:par");
    let mut inner_ctn = start_hold_ctn(&mut inner, node_ids, "0");
    let mut effects = inner_ctn.start("p:childTnLst");

    let direction = animation.direction();
    for (index, &spid) in spids.iter().enumerate() {
        let node_type = if index == 0 { "clickEffect" } else { "withEffect" };
        let mut par = effects.start("p:par");
        let mut ctn = par.start("p:cTn");
        ctn.attr_int("id", node_ids.next())
            .attr_int("presetID", animation.preset_id())
            .attr("presetClass", direction.preset_class())
            .attr("presetSubtype", "0")
            .attr("fill", "hold")
            .attr("grpId", "0")
            .attr("nodeType", node_type);
        write_start_delay(&mut ctn, "0");
        let mut behaviors = ctn.start("p:childTnLst");

        {
            let mut set = behaviors.start("p:set");
            {
                let mut c_bhvr = set.start("p:cBhvr");
                {
                    let mut set_ctn = c_bhvr.start("p:cTn");
                    set_ctn
                        .attr_int("id", node_ids.next())
                        .attr("dur", "1")
                        .attr("fill", "hold");
                    let mut cond_lst = set_ctn.start("p:stCondLst");
                    cond_lst
                        .start("p:cond")
                        .attr_int("delay", animation.visibility_delay_ms());
                }
                write_shape_target(&mut c_bhvr, spid);
                c_bhvr
                    .start("p:attrNameLst")
                    .start("p:attrName")
                    .text("style.visibility");
            }
            set.start("p:to")
                .start("p:strVal")
                .attr("val", direction.held_visibility());
        }

        let mut effect = behaviors.start("p:animEffect");
        effect
            .attr("transition", direction.as_str())
            .attr("filter", animation.filter());
        let mut c_bhvr = effect.start("p:cBhvr");
        c_bhvr
            .start("p:cTn")
            .attr_int("id", node_ids.next())
            .attr_int("dur", animation.duration_ms());
        write_shape_target(&mut c_bhvr, spid);
    }
}

fn write_media_timing(w: &mut XmlWriter, media: &[MediaTarget], config: &WriterConfig) {
    let mut node_ids = NodeIds::new();
    let mut timing = w.start("p:timing");
    let mut tn_lst = timing.start("p:tnLst");
    let mut root = tn_lst.start("p:par");
    let mut root_ctn = start_root_ctn(&mut root, &mut node_ids);
    let mut root_children = root_ctn.start("p:childTnLst");

    {
        let mut seq = root_children.start("p:seq");
        seq.attr("concurrent", "1").attr("nextAc", "seek");
        {
            let mut main_ctn = start_main_seq_ctn(&mut seq, &mut node_ids);
            let mut steps = main_ctn.start("p:childTnLst");
            for target in media {
                write_play_step(&mut steps, target.spid, config, &mut node_ids);
            }
        }
        write_slide_conditions(&mut seq);
    }

    for target in media {
        write_media_node(&mut root_children, target, config, &mut node_ids);
    }

    for target in media.iter().filter(|t| t.kind == MediaType::Video) {
        write_pause_toggle(&mut root_children, target.spid, &mut node_ids);
    }
}

/// Click-gated `playFrom(0.0)` call on a media shape.
fn write_play_step(w: &mut XmlWriter, spid: u32, config: &WriterConfig, node_ids: &mut NodeIds) {
    let mut outer = w.start("p:par");
    let mut outer_ctn = start_hold_ctn(&mut outer, node_ids, "indefinite");
    let mut outer_children = outer_ctn.start("p:childTnLst");
    let mut inner = outer_children.start("p:par");
    let mut inner_ctn = start_hold_ctn(&mut inner, node_ids, "0");
    let mut inner_children = inner_ctn.start("p:childTnLst");

    let mut par = inner_children.start("p:par");
    let mut ctn = par.start("p:cTn");
    ctn.attr_int("id", node_ids.next())
        .attr("presetID", "1")
        .attr("presetClass", "mediacall")
        .attr("presetSubtype", "0")
        .attr("fill", "hold")
        .attr("nodeType", "clickEffect");
    write_start_delay(&mut ctn, "0");
    let mut children = ctn.start("p:childTnLst");
    write_media_command(
        &mut children,
        "playFrom(0.0)",
        config.media_duration_ms,
        spid,
        node_ids,
    );
}

fn write_media_node(
    w: &mut XmlWriter,
    target: &MediaTarget,
    config: &WriterConfig,
    node_ids: &mut NodeIds,
) {
    let mut media = w.start(target.kind.timing_element());
    let mut node = media.start("p:cMediaNode");
    node.attr_int("vol", config.media_volume);
    {
        let mut ctn = node.start("p:cTn");
        ctn.attr_int("id", node_ids.next())
            .attr("fill", "hold")
            .attr("display", "0");
        write_start_delay(&mut ctn, "indefinite");
        if target.kind == MediaType::Audio {
            let mut end = ctn.start("p:endCondLst");
            let mut cond = end.start("p:cond");
            cond.attr("evt", "onStopAudio").attr("delay", "0");
            cond.start("p:tgtEl").start("p:sldTgt");
        }
    }
    write_shape_target(&mut node, target.spid);
}

/// Interactive sequence toggling playback when the video is clicked.
fn write_pause_toggle(w: &mut XmlWriter, spid: u32, node_ids: &mut NodeIds) {
    let mut seq = w.start("p:seq");
    seq.attr("concurrent", "1").attr("nextAc", "seek");
    {
        let mut ctn = seq.start("p:cTn");
        ctn.attr_int("id", node_ids.next())
            .attr("restart", "whenNotActive")
            .attr("fill", "hold")
            .attr("evtFilter", "cancelBubble")
            .attr("nodeType", "interactiveSeq");
        write_click_condition(&mut ctn, "p:stCondLst", spid);
        {
            let mut end_sync = ctn.start("p:endSync");
            end_sync.attr("evt", "end").attr("delay", "0");
            end_sync.start("p:rtn").attr("val", "all");
        }

        let mut children = ctn.start("p:childTnLst");
        let mut outer = children.start("p:par");
        let mut outer_ctn = start_hold_ctn(&mut outer, node_ids, "0");
        let mut outer_children = outer_ctn.start("p:childTnLst");
        let mut inner = outer_children.start("p:par");
        let mut inner_ctn = start_hold_ctn(&mut inner, node_ids, "0");
        let mut inner_children = inner_ctn.start("p:childTnLst");

        let mut par = inner_children.start("p:par");
        let mut effect_ctn = par.start("p:cTn");
        effect_ctn
            .attr_int("id", node_ids.next())
            .attr("presetID", "2")
            .attr("presetClass", "mediacall")
            .attr("presetSubtype", "0")
            .attr("fill", "hold")
            .attr("nodeType", "clickEffect");
        write_start_delay(&mut effect_ctn, "0");
        let mut effect_children = effect_ctn.start("p:childTnLst");
        write_media_command(&mut effect_children, "togglePause", 1, spid, node_ids);
    }
    write_click_condition(&mut seq, "p:nextCondLst", spid);
}

fn write_media_command(
    w: &mut XmlWriter,
    command: &str,
    duration_ms: u32,
    spid: u32,
    node_ids: &mut NodeIds,
) {
    let mut cmd = w.start("p:cmd");
    cmd.attr("type", "call").attr("cmd", command);
    let mut c_bhvr = cmd.start("p:cBhvr");
    c_bhvr
        .start("p:cTn")
        .attr_int("id", node_ids.next())
        .attr_int("dur", duration_ms)
        .attr("fill", "hold");
    write_shape_target(&mut c_bhvr, spid);
}

fn start_root_ctn<'w>(w: &'w mut XmlWriter, node_ids: &mut NodeIds) -> Element<'w> {
    let mut ctn = w.start("p:cTn");
    ctn.attr_int("id", node_ids.next())
        .attr("dur", "indefinite")
        .attr("restart", "never")
        .attr("nodeType", "tmRoot");
    ctn
}

fn start_main_seq_ctn<'w>(
    w: &'w mut XmlWriter,
    node_ids: &mut NodeIds,
) -> Element<'w> {
    let mut ctn = w.start("p:cTn");
    ctn.attr_int("id", node_ids.next())
        .attr("dur", "indefinite")
        .attr("nodeType", "mainSeq");
    ctn
}

/// `p:cTn fill="hold"` with a start delay, left open for its children.
fn start_hold_ctn<'w>(
    w: &'w mut XmlWriter,
    node_ids: &mut NodeIds,
    delay: &str,
) -> Element<'w> {
    let mut ctn = w.start("p:cTn");
    ctn.attr_int("id", node_ids.next()).attr("fill", "hold");
    write_start_delay(&mut ctn, delay);
    ctn
}

fn write_start_delay(w: &mut XmlWriter, delay: &str) {
    w.start("p:stCondLst").start("p:cond").attr("delay", delay);
}

fn write_shape_target(w: &mut XmlWriter, spid: u32) {
    w.start("p:tgtEl").start("p:spTgt").attr_int("spid", spid);
}

fn write_click_condition(w: &mut XmlWriter, list: &'static str, spid: u32) {
    let mut cond_lst = w.start(list);
    let mut cond = cond_lst.start("p:cond");
    cond.attr("evt", "onClick").attr("delay", "0");
    write_shape_target(&mut cond, spid);
}

/// `onPrev`/`onNext` slide conditions closing the main sequence.
fn write_slide_conditions(w: &mut XmlWriter) {
    for (list, event) in [("p:prevCondLst", "onPrev"), ("p:nextCondLst", "onNext")] {
        let mut cond_lst = w.start(list);
        let mut cond = cond_lst.start("p:cond");
        cond.attr("evt", event).attr("delay", "0");
        cond.start("p:tgtEl").start("p:sldTgt");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::error::OoxmlError;
    use crate::ooxml::pptx::animations::EffectDirection;
    use crate::ooxml::pptx::shapes::Shape;
    use crate::ooxml::pptx::writer::rels::assign_relationships;

    fn render_timing(slide: &Slide) -> Result<String> {
        let config = WriterConfig::default();
        let (_, ids) = assign_relationships(slide, 0, &config)?;
        let mut w = XmlWriter::new();
        write_timing(&mut w, slide, &ids, &config)?;
        Ok(w.finish())
    }

    #[test]
    fn test_idle_slide_has_no_timing() {
        let mut slide = Slide::new();
        slide.add_shape(Shape::drawing("Pic", "image1.png"));
        assert_eq!(TimingState::of(&slide), TimingState::Idle);
        assert_eq!(render_timing(&slide).unwrap(), "");
    }

    #[test]
    fn test_exit_effect_hides_before_end() {
        let mut slide = Slide::new();
        let shape = Shape::drawing("Pic", "image1.png");
        let animation = Animation::new()
            .with_shape(&shape)
            .with_filter("fade")
            .with_direction(EffectDirection::Out)
            .with_duration(5);
        slide.add_shape(shape);
        slide.add_animation(animation);

        let xml = render_timing(&slide).unwrap();
        assert!(xml.contains(r#"<p:cond delay="4999"/>"#));
        assert!(xml.contains(r#"<p:strVal val="hidden"/>"#));
        assert!(xml.contains(r#"presetID="10" presetClass="exit""#));
        assert!(xml.contains(r#"<p:animEffect transition="out" filter="fade">"#));
        assert!(xml.contains(r#"<p:cTn id="7" dur="5000"/>"#));
        assert!(xml.contains(r#"<p:cTn id="1" dur="indefinite" restart="never" nodeType="tmRoot">"#));
        assert!(xml.contains(r#"<p:cTn id="2" dur="indefinite" nodeType="mainSeq">"#));
    }

    #[test]
    fn test_two_shapes_share_one_click() {
        let mut slide = Slide::new();
        let a = Shape::drawing("A", "a.png");
        let b = Shape::chart("B", "chart1.xml");
        let animation = Animation::new()
            .with_shape(&a)
            .with_shape(&b)
            .with_direction(EffectDirection::In);
        slide.add_shape(a);
        slide.add_shape(b);
        slide.add_animation(animation);

        let xml = render_timing(&slide).unwrap();
        assert_eq!(xml.matches(r#"nodeType="clickEffect""#).count(), 1);
        assert_eq!(xml.matches(r#"nodeType="withEffect""#).count(), 1);
        assert!(xml.contains(r#"<p:strVal val="visible"/>"#));
        assert!(xml.ends_with(
            r#"<p:bldLst><p:bldP spid="2" grpId="0"/><p:bldP spid="3" grpId="0"/></p:bldLst></p:timing>"#
        ));
    }

    #[test]
    fn test_node_ids_are_sequential() {
        let mut slide = Slide::new();
        let shape = Shape::drawing("A", "a.png");
        slide.add_shape(shape.clone());
        slide.add_animation(Animation::new().with_shape(&shape));
        slide.add_animation(Animation::new().with_shape(&shape));

        let xml = render_timing(&slide).unwrap();
        // root, main sequence, then 5 nodes per single-shape animation
        for id in 1..=12 {
            assert!(xml.contains(&format!(r#"<p:cTn id="{}""#, id)), "missing node {}", id);
        }
        assert!(!xml.contains(r#"<p:cTn id="13""#));
    }

    #[test]
    fn test_nested_target_is_defect() {
        let nested = Shape::drawing("Inner", "a.png");
        let mut slide = Slide::new();
        slide.add_shape(Shape::group("Group", vec![nested.clone()]));
        slide.add_animation(Animation::new().with_shape(&nested));
        assert!(matches!(
            render_timing(&slide),
            Err(OoxmlError::StructuralDefect(_))
        ));
    }

    #[test]
    fn test_media_only_timing() {
        let mut slide = Slide::new();
        slide.add_shape(Shape::drawing("Pic", "image1.png"));
        slide.add_shape(Shape::video("Clip", "video1.mp4"));
        slide.add_shape(Shape::audio("Sound", "audio1.mp3"));
        assert_eq!(TimingState::of(&slide), TimingState::MediaOnly);

        let xml = render_timing(&slide).unwrap();
        assert_eq!(xml.matches(r#"cmd="playFrom(0.0)""#).count(), 2);
        assert!(xml.contains(r#"<p:cTn id="6" dur="25032" fill="hold"/><p:tgtEl><p:spTgt spid="3"/>"#));
        assert!(xml.contains(r#"<p:video><p:cMediaNode vol="80000">"#));
        assert!(xml.contains(r#"<p:audio><p:cMediaNode vol="80000">"#));
        assert_eq!(xml.matches(r#"evt="onStopAudio""#).count(), 1);
        assert_eq!(xml.matches(r#"nodeType="interactiveSeq""#).count(), 1);
        assert!(xml.contains(r#"cmd="togglePause""#));
        assert!(!xml.contains("p:bldLst"));
    }

    #[test]
    fn test_media_volume_from_config() {
        let mut slide = Slide::new();
        slide.add_shape(Shape::audio("Sound", "audio1.mp3"));
        let config = WriterConfig {
            media_volume: 50_000,
            media_duration_ms: 1_000,
            ..Default::default()
        };
        let (_, ids) = assign_relationships(&slide, 0, &config).unwrap();
        let mut w = XmlWriter::new();
        write_timing(&mut w, &slide, &ids, &config).unwrap();
        let xml = w.finish();
        assert!(xml.contains(r#"vol="50000""#));
        assert!(xml.contains(r#"dur="1000""#));
        assert!(!xml.contains("interactiveSeq"));
    }
}
