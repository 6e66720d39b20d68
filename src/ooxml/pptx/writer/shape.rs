//! Shape markup for the slide content part.
//!
//! [`ShapeTreeWriter`] writes the children of `p:spTree`. Direct children
//! of the slide take the drawing IDs the relationship pass enumerated;
//! shapes nested in groups are numbered from a second counter that starts
//! after the last direct child, so IDs stay unique across the tree.
//! Hyperlinks are written in the pre-order the relationship pass declared
//! them, each occurrence taking the next hyperlink relationship.

use crate::common::unit::{DEFAULT_DPI, degrees_to_angle, px_to_emu};
use crate::common::xml::XmlWriter;
use crate::ooxml::error::Result;
use crate::ooxml::opc::RelId;
use crate::ooxml::opc::constants::{P14_MEDIA_EXT_URI, namespace};
use crate::ooxml::pptx::config::WriterConfig;
use crate::ooxml::pptx::hyperlinks::Hyperlink;
use crate::ooxml::pptx::shapes::{
    Chart, Drawing, Geometry, Paragraph, Shape, ShapeKind, Table, TextElement,
};
use crate::ooxml::pptx::writer::relmap::{HyperlinkCursor, ROOT_GROUP_ID, SlideIdentifiers};

pub(crate) struct ShapeTreeWriter<'a> {
    ids: &'a SlideIdentifiers,
    links: HyperlinkCursor<'a>,
    dpi: u32,
    next_nested_id: u32,
}

impl<'a> ShapeTreeWriter<'a> {
    pub(crate) fn new(ids: &'a SlideIdentifiers, config: &WriterConfig) -> Self {
        Self {
            ids,
            links: ids.hyperlink_cursor(),
            dpi: config.dpi,
            next_nested_id: ids.first_nested_drawing_id(),
        }
    }

    /// Write the direct children of the slide.
    pub(crate) fn write_slide_shapes(&mut self, w: &mut XmlWriter, shapes: &[Shape]) -> Result<()> {
        for (index, shape) in shapes.iter().enumerate() {
            let id = self.ids.direct_drawing_id(index);
            self.write_shape(w, shape, id)?;
        }
        Ok(())
    }

    /// Check that every declared hyperlink relationship was written.
    pub(crate) fn finish(self) -> Result<()> {
        self.links.finish()
    }

    fn write_nested_shapes(&mut self, w: &mut XmlWriter, shapes: &[Shape]) -> Result<()> {
        for shape in shapes {
            if shape.is_comment() {
                continue;
            }
            let id = self.next_nested_id;
            self.next_nested_id += 1;
            self.write_shape(w, shape, id)?;
        }
        Ok(())
    }

    fn write_shape(&mut self, w: &mut XmlWriter, shape: &Shape, id: u32) -> Result<()> {
        match &shape.kind {
            ShapeKind::Drawing(drawing) => self.write_picture(w, shape, drawing, id),
            ShapeKind::Video(_) | ShapeKind::Audio(_) => self.write_media(w, shape, id),
            ShapeKind::Chart(chart) => self.write_chart(w, shape, chart, id),
            ShapeKind::Table(table) => self.write_table(w, shape, table, id),
            ShapeKind::RichText(text) => self.write_text_box(w, shape, &text.paragraphs, id),
            ShapeKind::Group(group) => {
                let mut grp = w.start("p:grpSp");
                {
                    let mut nv = grp.start("p:nvGrpSpPr");
                    self.write_c_nv_pr(&mut nv, shape, id, false)?;
                    nv.start("p:cNvGrpSpPr");
                    nv.start("p:nvPr");
                }
                {
                    let mut pr = grp.start("p:grpSpPr");
                    write_xfrm(&mut pr, "a:xfrm", &shape.geometry, self.dpi, true);
                }
                self.write_nested_shapes(&mut grp, &group.shapes)
            },
            // Comments are stored in the comments part.
            ShapeKind::Comment(_) => Ok(()),
        }
    }

    /// `p:cNvPr` with the shape's hyperlink. Media shapes already use
    /// `a:hlinkClick` for playback, so their own link becomes `a:hlinkHover`.
    fn write_c_nv_pr(&mut self, w: &mut XmlWriter, shape: &Shape, id: u32, media: bool) -> Result<()> {
        let mut c_nv_pr = w.start("p:cNvPr");
        c_nv_pr.attr_int("id", id).attr("name", &shape.name);
        if !shape.description.is_empty() {
            c_nv_pr.attr("descr", &shape.description);
        }
        if media {
            c_nv_pr
                .start("a:hlinkClick")
                .attr("r:id", "")
                .attr("action", "ppaction://media");
        }
        if let Some(link) = &shape.hyperlink {
            let rel = self.links.next_rel(link)?;
            let element = if media { "a:hlinkHover" } else { "a:hlinkClick" };
            write_hyperlink(&mut c_nv_pr, element, link, rel);
        }
        Ok(())
    }

    fn write_picture(
        &mut self,
        w: &mut XmlWriter,
        shape: &Shape,
        drawing: &Drawing,
        id: u32,
    ) -> Result<()> {
        let rel = self.ids.require_shape_rel(shape.hash_code())?;
        tracing::trace!(id, rel = %rel, file = %drawing.filename, "picture");

        let mut pic = w.start("p:pic");
        {
            let mut nv = pic.start("p:nvPicPr");
            self.write_c_nv_pr(&mut nv, shape, id, false)?;
            nv.start("p:cNvPicPr")
                .start("a:picLocks")
                .attr("noChangeAspect", "1");
            nv.start("p:nvPr");
        }
        write_blip_fill(&mut pic, rel);
        self.write_sp_pr(&mut pic, &shape.geometry);
        Ok(())
    }

    fn write_media(&mut self, w: &mut XmlWriter, shape: &Shape, id: u32) -> Result<()> {
        let Some((media_type, _)) = shape.media() else {
            return Ok(());
        };
        // Companion entries follow the primary ID: +1 embedded media, +2 poster.
        let rel = self.ids.require_shape_rel(shape.hash_code())?;
        tracing::trace!(id, rel = %rel, kind = ?media_type, "media picture");

        let mut pic = w.start("p:pic");
        {
            let mut nv = pic.start("p:nvPicPr");
            self.write_c_nv_pr(&mut nv, shape, id, true)?;
            nv.start("p:cNvPicPr")
                .start("a:picLocks")
                .attr("noChangeAspect", "1");
            let mut nv_pr = nv.start("p:nvPr");
            nv_pr
                .start(media_type.file_element())
                .attr("r:link", &rel.to_string());
            let mut ext_lst = nv_pr.start("p:extLst");
            let mut ext = ext_lst.start("p:ext");
            ext.attr("uri", P14_MEDIA_EXT_URI);
            ext.start("p14:media")
                .attr("xmlns:p14", namespace::P14)
                .attr("r:embed", &rel.offset(1).to_string());
        }
        write_blip_fill(&mut pic, rel.offset(2));
        self.write_sp_pr(&mut pic, &shape.geometry);
        Ok(())
    }

    fn write_chart(&mut self, w: &mut XmlWriter, shape: &Shape, chart: &Chart, id: u32) -> Result<()> {
        let rel = self.ids.require_shape_rel(shape.hash_code())?;
        tracing::trace!(id, rel = %rel, part = %chart.filename, "chart frame");

        let mut frame = w.start("p:graphicFrame");
        {
            let mut nv = frame.start("p:nvGraphicFramePr");
            self.write_c_nv_pr(&mut nv, shape, id, false)?;
            nv.start("p:cNvGraphicFramePr");
            nv.start("p:nvPr");
        }
        write_xfrm(&mut frame, "p:xfrm", &shape.geometry, self.dpi, false);
        let mut graphic = frame.start("a:graphic");
        let mut data = graphic.start("a:graphicData");
        data.attr("uri", namespace::DML_CHART);
        data.start("c:chart")
            .attr("xmlns:c", namespace::DML_CHART)
            .attr("r:id", &rel.to_string());
        Ok(())
    }

    fn write_table(&mut self, w: &mut XmlWriter, shape: &Shape, table: &Table, id: u32) -> Result<()> {
        let mut frame = w.start("p:graphicFrame");
        {
            let mut nv = frame.start("p:nvGraphicFramePr");
            self.write_c_nv_pr(&mut nv, shape, id, false)?;
            nv.start("p:cNvGraphicFramePr")
                .start("a:graphicFrameLocks")
                .attr("noGrp", "1");
            nv.start("p:nvPr");
        }
        write_xfrm(&mut frame, "p:xfrm", &shape.geometry, self.dpi, false);

        let mut graphic = frame.start("a:graphic");
        let mut data = graphic.start("a:graphicData");
        data.attr("uri", namespace::DML_TABLE);
        let mut tbl = data.start("a:tbl");
        tbl.start("a:tblPr")
            .attr("firstRow", "1")
            .attr("bandRow", "1");

        let widths = column_widths(table, shape.geometry.width);
        {
            let mut grid = tbl.start("a:tblGrid");
            for width in &widths {
                grid.start("a:gridCol")
                    .attr_int("w", px_to_emu(*width, self.dpi));
            }
        }

        for row in &table.rows {
            let mut tr = tbl.start("a:tr");
            tr.attr_int("h", px_to_emu(row.height, self.dpi));
            for column in 0..widths.len() {
                let mut tc = tr.start("a:tc");
                {
                    let mut body = tc.start("a:txBody");
                    body.start("a:bodyPr");
                    body.start("a:lstStyle");
                    let paragraphs = row
                        .cells
                        .get(column)
                        .map_or(&[][..], |cell| cell.paragraphs.as_slice());
                    if paragraphs.is_empty() {
                        body.start("a:p");
                    } else {
                        write_paragraphs(&mut body, paragraphs, Some(&mut self.links))?;
                    }
                }
                tc.start("a:tcPr");
            }
        }
        Ok(())
    }

    fn write_text_box(
        &mut self,
        w: &mut XmlWriter,
        shape: &Shape,
        paragraphs: &[Paragraph],
        id: u32,
    ) -> Result<()> {
        let mut sp = w.start("p:sp");
        {
            let mut nv = sp.start("p:nvSpPr");
            self.write_c_nv_pr(&mut nv, shape, id, false)?;
            nv.start("p:cNvSpPr").attr("txBox", "1");
            nv.start("p:nvPr");
        }
        {
            let mut sp_pr = sp.start("p:spPr");
            write_xfrm(&mut sp_pr, "a:xfrm", &shape.geometry, self.dpi, false);
            sp_pr.start("a:prstGeom").attr("prst", "rect").start("a:avLst");
            sp_pr.start("a:noFill");
        }
        let mut body = sp.start("p:txBody");
        body.start("a:bodyPr").attr("wrap", "square").attr("rtlCol", "0");
        body.start("a:lstStyle");
        if paragraphs.is_empty() {
            body.start("a:p");
        }
        write_paragraphs(&mut body, paragraphs, Some(&mut self.links))
    }

    fn write_sp_pr(&self, w: &mut XmlWriter, geometry: &Geometry) {
        let mut sp_pr = w.start("p:spPr");
        write_xfrm(&mut sp_pr, "a:xfrm", geometry, self.dpi, false);
        sp_pr.start("a:prstGeom").attr("prst", "rect").start("a:avLst");
    }
}

/// `p:nvGrpSpPr` and zeroed `p:grpSpPr` of the implicit root group.
pub(crate) fn write_root_group_properties(w: &mut XmlWriter) {
    {
        let mut nv = w.start("p:nvGrpSpPr");
        nv.start("p:cNvPr")
            .attr_int("id", ROOT_GROUP_ID)
            .attr("name", "");
        nv.start("p:cNvGrpSpPr");
        nv.start("p:nvPr");
    }
    let mut pr = w.start("p:grpSpPr");
    write_xfrm(&mut pr, "a:xfrm", &Geometry::default(), DEFAULT_DPI, true);
}

/// Column widths in pixels. Missing explicit widths share the table width
/// evenly across the widest row.
fn column_widths(table: &Table, table_width: i64) -> Vec<i64> {
    let widest_row = table.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0);
    let count = table.columns.len().max(widest_row);
    if count == 0 {
        return Vec::new();
    }
    let even = table_width / count as i64;
    (0..count)
        .map(|i| table.columns.get(i).copied().unwrap_or(even))
        .collect()
}

pub(crate) fn write_xfrm(
    w: &mut XmlWriter,
    name: &'static str,
    geometry: &Geometry,
    dpi: u32,
    group: bool,
) {
    let x = px_to_emu(geometry.offset_x, dpi);
    let y = px_to_emu(geometry.offset_y, dpi);
    let cx = px_to_emu(geometry.width, dpi);
    let cy = px_to_emu(geometry.height, dpi);

    let mut xfrm = w.start(name);
    if geometry.rotation != 0 {
        xfrm.attr_int("rot", degrees_to_angle(geometry.rotation));
    }
    xfrm.start("a:off").attr_int("x", x).attr_int("y", y);
    xfrm.start("a:ext").attr_int("cx", cx).attr_int("cy", cy);
    if group {
        xfrm.start("a:chOff").attr_int("x", x).attr_int("y", y);
        xfrm.start("a:chExt").attr_int("cx", cx).attr_int("cy", cy);
    }
}

fn write_blip_fill(w: &mut XmlWriter, rel: RelId) {
    let mut blip_fill = w.start("p:blipFill");
    blip_fill.start("a:blip").attr("r:embed", &rel.to_string());
    blip_fill.start("a:stretch").start("a:fillRect");
}

fn write_hyperlink(w: &mut XmlWriter, element: &'static str, link: &Hyperlink, rel: RelId) {
    w.start(element)
        .attr("r:id", &rel.to_string())
        .attr_opt("action", link.action())
        .attr_opt("tooltip", link.tooltip());
}

/// Write `a:p` elements. Without a hyperlink cursor (notes) hyperlinks are dropped.
pub(crate) fn write_paragraphs(
    w: &mut XmlWriter,
    paragraphs: &[Paragraph],
    mut links: Option<&mut HyperlinkCursor<'_>>,
) -> Result<()> {
    for paragraph in paragraphs {
        let mut p = w.start("a:p");
        if let Some(alignment) = paragraph.alignment {
            p.start("a:pPr").attr("algn", alignment.as_str());
        }
        for element in &paragraph.elements {
            match element {
                TextElement::Break => {
                    p.start("a:br")
                        .start("a:rPr")
                        .attr("lang", "en-US")
                        .attr("dirty", "0");
                },
                TextElement::Text { text, hyperlink } => {
                    let mut r = p.start("a:r");
                    {
                        let mut r_pr = r.start("a:rPr");
                        r_pr.attr("lang", "en-US").attr("dirty", "0");
                        write_run_hyperlink(&mut r_pr, hyperlink.as_ref(), links.as_deref_mut())?;
                    }
                    r.start("a:t").text(text);
                },
                TextElement::Run {
                    text,
                    format,
                    hyperlink,
                } => {
                    let mut r = p.start("a:r");
                    {
                        let mut r_pr = r.start("a:rPr");
                        r_pr.attr("lang", "en-US");
                        if let Some(size) = format.size {
                            r_pr.attr_int("sz", size);
                        }
                        r_pr.attr_flag("b", format.bold())
                            .attr_flag("i", format.italic());
                        if format.underline() {
                            r_pr.attr("u", "sng");
                        }
                        if format.strikethrough() {
                            r_pr.attr("strike", "sngStrike");
                        }
                        r_pr.attr("dirty", "0");
                        if let Some(color) = &format.color {
                            r_pr.start("a:solidFill").start("a:srgbClr").attr("val", color);
                        }
                        if let Some(font) = &format.font {
                            r_pr.start("a:latin").attr("typeface", font);
                        }
                        write_run_hyperlink(&mut r_pr, hyperlink.as_ref(), links.as_deref_mut())?;
                    }
                    r.start("a:t").text(text);
                },
            }
        }
        p.start("a:endParaRPr").attr("lang", "en-US").attr("dirty", "0");
    }
    Ok(())
}

fn write_run_hyperlink(
    w: &mut XmlWriter,
    link: Option<&Hyperlink>,
    links: Option<&mut HyperlinkCursor<'_>>,
) -> Result<()> {
    if let (Some(link), Some(links)) = (link, links) {
        let rel = links.next_rel(link)?;
        write_hyperlink(w, "a:hlinkClick", link, rel);
    }
    Ok(())
}
