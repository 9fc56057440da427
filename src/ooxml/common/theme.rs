/// Office theme part (`theme1.xml`) shared by all three formats.
///
/// Charts with no explicit series color fall back to the theme's accent
/// colors, so every generated package carries one.
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Theme fonts and colors.
#[derive(Debug, Clone)]
pub struct Theme {
    name: String,
    major_font: String,
    minor_font: String,
    color_scheme: ColorScheme,
}

/// The 12 theme colors.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    name: String,
    dk1: String,
    lt1: String,
    dk2: String,
    lt2: String,
    accents: [String; 6],
    hlink: String,
    fol_hlink: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::office()
    }
}

impl Theme {
    /// The stock Office theme.
    pub fn office() -> Self {
        Self {
            name: "Office Theme".to_string(),
            major_font: "Calibri Light".to_string(),
            minor_font: "Calibri".to_string(),
            color_scheme: ColorScheme::default(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_fonts(&mut self, major: impl Into<String>, minor: impl Into<String>) {
        self.major_font = major.into();
        self.minor_font = minor.into();
    }

    #[inline]
    pub fn minor_font(&self) -> &str {
        &self.minor_font
    }

    pub fn color_scheme_mut(&mut self) -> &mut ColorScheme {
        &mut self.color_scheme
    }

    /// Generate theme1.xml content.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(6144);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            &mut xml,
            r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="{}">"#,
            escape_xml(&self.name)
        )?;
        xml.push_str("<a:themeElements>");
        self.color_scheme.write_xml(&mut xml)?;

        xml.push_str(r#"<a:fontScheme name="Office">"#);
        for (tag, face) in [("majorFont", &self.major_font), ("minorFont", &self.minor_font)] {
            write!(
                &mut xml,
                r#"<a:{0}><a:latin typeface="{1}"/><a:ea typeface=""/><a:cs typeface=""/></a:{0}>"#,
                tag,
                escape_xml(face)
            )?;
        }
        xml.push_str("</a:fontScheme>");

        xml.push_str(r#"<a:fmtScheme name="Office">"#);
        xml.push_str("<a:fillStyleLst>");
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
        xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:tint val="50000"/><a:satMod val="300000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:tint val="15000"/><a:satMod val="350000"/></a:schemeClr></a:gs></a:gsLst><a:lin ang="16200000" scaled="1"/></a:gradFill>"#);
        xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:shade val="51000"/><a:satMod val="130000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:shade val="94000"/><a:satMod val="135000"/></a:schemeClr></a:gs></a:gsLst><a:lin ang="16200000" scaled="0"/></a:gradFill>"#);
        xml.push_str("</a:fillStyleLst>");
        xml.push_str("<a:lnStyleLst>");
        for width in [9525, 25400, 38100] {
            write!(
                &mut xml,
                r#"<a:ln w="{}" cap="flat" cmpd="sng" algn="ctr"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:prstDash val="solid"/></a:ln>"#,
                width
            )?;
        }
        xml.push_str("</a:lnStyleLst>");
        xml.push_str("<a:effectStyleLst>");
        for _ in 0..2 {
            xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
        }
        xml.push_str(r#"<a:effectStyle><a:effectLst><a:outerShdw blurRad="57150" dist="19050" dir="5400000" algn="ctr" rotWithShape="0"><a:srgbClr val="000000"><a:alpha val="63000"/></a:srgbClr></a:outerShdw></a:effectLst></a:effectStyle>"#);
        xml.push_str("</a:effectStyleLst>");
        xml.push_str("<a:bgFillStyleLst>");
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#);
        xml.push_str(r#"<a:solidFill><a:schemeClr val="phClr"><a:tint val="95000"/><a:satMod val="170000"/></a:schemeClr></a:solidFill>"#);
        xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst><a:gs pos="0"><a:schemeClr val="phClr"><a:tint val="93000"/><a:satMod val="150000"/></a:schemeClr></a:gs><a:gs pos="100000"><a:schemeClr val="phClr"><a:shade val="63000"/><a:satMod val="120000"/></a:schemeClr></a:gs></a:gsLst><a:lin ang="5400000" scaled="0"/></a:gradFill>"#);
        xml.push_str("</a:bgFillStyleLst>");
        xml.push_str("</a:fmtScheme>");

        xml.push_str("</a:themeElements>");
        xml.push_str("<a:objectDefaults/>");
        xml.push_str("<a:extraClrSchemeLst/>");
        xml.push_str("</a:theme>");

        Ok(xml)
    }
}

impl ColorScheme {
    /// Set an accent color by index (0-5); other indices are ignored.
    pub fn set_accent(&mut self, index: usize, color: impl Into<String>) {
        if let Some(slot) = self.accents.get_mut(index) {
            *slot = color.into();
        }
    }

    pub fn accent(&self, index: usize) -> Option<&str> {
        self.accents.get(index).map(String::as_str)
    }

    fn write_xml(&self, xml: &mut String) -> Result<()> {
        write!(xml, r#"<a:clrScheme name="{}">"#, escape_xml(&self.name))?;
        write!(xml, r#"<a:dk1><a:sysClr val="windowText" lastClr="{}"/></a:dk1>"#, self.dk1)?;
        write!(xml, r#"<a:lt1><a:sysClr val="window" lastClr="{}"/></a:lt1>"#, self.lt1)?;
        write!(xml, r#"<a:dk2><a:srgbClr val="{}"/></a:dk2>"#, self.dk2)?;
        write!(xml, r#"<a:lt2><a:srgbClr val="{}"/></a:lt2>"#, self.lt2)?;
        for (i, accent) in self.accents.iter().enumerate() {
            write!(
                xml,
                r#"<a:accent{0}><a:srgbClr val="{1}"/></a:accent{0}>"#,
                i + 1,
                escape_xml(accent)
            )?;
        }
        write!(xml, r#"<a:hlink><a:srgbClr val="{}"/></a:hlink>"#, self.hlink)?;
        write!(xml, r#"<a:folHlink><a:srgbClr val="{}"/></a:folHlink>"#, self.fol_hlink)?;
        xml.push_str("</a:clrScheme>");
        Ok(())
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            name: "Office".to_string(),
            dk1: "000000".to_string(),
            lt1: "FFFFFF".to_string(),
            dk2: "1F497D".to_string(),
            lt2: "EEECE1".to_string(),
            accents: [
                "4F81BD".to_string(),
                "C0504D".to_string(),
                "9BBB59".to_string(),
                "8064A2".to_string(),
                "4BACC6".to_string(),
                "F79646".to_string(),
            ],
            hlink: "0000FF".to_string(),
            fol_hlink: "800080".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_xml_sections() {
        let xml = Theme::office().to_xml().unwrap();
        assert!(xml.contains(r#"name="Office Theme""#));
        assert!(xml.contains("<a:accent1><a:srgbClr val=\"4F81BD\"/></a:accent1>"));
        assert!(xml.contains(r#"<a:minorFont><a:latin typeface="Calibri"/>"#));
        assert!(xml.ends_with("</a:theme>"));
    }

    #[test]
    fn test_accent_override() {
        let mut theme = Theme::office();
        theme.color_scheme_mut().set_accent(0, "FF0000");
        theme.color_scheme_mut().set_accent(9, "00FF00");
        assert_eq!(theme.color_scheme_mut().accent(0), Some("FF0000"));
        assert!(theme.to_xml().unwrap().contains(r#"<a:accent1><a:srgbClr val="FF0000"/>"#));
    }
}
