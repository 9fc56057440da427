//! Document properties shared by DOCX, XLSX and PPTX.
//!
//! Core properties go to `docProps/core.xml`, application properties to
//! `docProps/app.xml`.

use crate::common::xml::Element;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, namespace as ns, relationship_type as rt};
use crate::ooxml::opc::{DocumentModel, GenerationContext, Lifecycle, OfficePackage};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

/// Document core properties (metadata).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentProperties {
    pub title: Option<String>,
    pub subject: Option<String>,
    /// Document creator/author
    pub creator: Option<String>,
    /// Comma-separated keywords
    pub keywords: Option<String>,
    pub description: Option<String>,
    pub last_modified_by: Option<String>,
    pub category: Option<String>,
    /// Company shown in the application properties
    pub company: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

impl DocumentProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn creator(mut self, creator: &str) -> Self {
        self.creator = Some(creator.to_string());
        self
    }

    pub fn keywords(mut self, keywords: &str) -> Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn company(mut self, company: &str) -> Self {
        self.company = Some(company.to_string());
        self
    }

    /// Fix both timestamps, e.g. for reproducible output.
    pub fn timestamps(mut self, created: DateTime<Utc>, modified: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self.modified = Some(modified);
        self
    }

    /// Build the `cp:coreProperties` tree.
    ///
    /// Missing timestamps are filled with `now`.
    pub fn core_element(&self, now: DateTime<Utc>) -> Element {
        fn text(name: &str, value: &Option<String>) -> Option<Element> {
            value.as_deref().map(|v| Element::new(name).text(v))
        }
        fn stamp(name: &str, at: DateTime<Utc>) -> Element {
            Element::new(name)
                .attr("xsi:type", "dcterms:W3CDTF")
                .text(at.to_rfc3339_opts(SecondsFormat::Secs, true))
        }

        Element::new("cp:coreProperties")
            .attr("xmlns:cp", ns::OPC_CORE_PROPERTIES)
            .attr("xmlns:dc", ns::DC)
            .attr("xmlns:dcterms", ns::DC_TERMS)
            .attr("xmlns:dcmitype", ns::DC_MITYPE)
            .attr("xmlns:xsi", ns::XSI)
            .child_opt(text("dc:title", &self.title))
            .child_opt(text("dc:subject", &self.subject))
            .child(Element::new("dc:creator").text(self.creator.as_deref().unwrap_or("ooxmlgen")))
            .child_opt(text("cp:keywords", &self.keywords))
            .child_opt(text("dc:description", &self.description))
            .child(
                Element::new("cp:lastModifiedBy").text(
                    self.last_modified_by
                        .as_deref()
                        .or(self.creator.as_deref())
                        .unwrap_or("ooxmlgen"),
                ),
            )
            .child_opt(text("cp:category", &self.category))
            .child(stamp("dcterms:created", self.created.unwrap_or(now)))
            .child(stamp("dcterms:modified", self.modified.unwrap_or(now)))
    }

    /// Build the extended `Properties` tree for `docProps/app.xml`.
    ///
    /// `extra` carries application-specific statistics (slide or word
    /// counts) and is inserted before the company name.
    pub fn app_element(&self, application: &str, extra: Vec<Element>) -> Element {
        Element::new("Properties")
            .attr("xmlns", ns::OFC_EXTENDED_PROPERTIES)
            .attr("xmlns:vt", ns::OFC_DOC_PROPS_VTYPES)
            .child(Element::new("Application").text(application))
            .child(Element::new("DocSecurity").text(0))
            .child(Element::new("ScaleCrop").text("false"))
            .children_from(extra)
            .child(Element::new("Company").text(self.company.as_deref().unwrap_or("")))
            .child(Element::new("LinksUpToDate").text("false"))
            .child(Element::new("SharedDoc").text("false"))
            .child(Element::new("HyperlinksChanged").text("false"))
            .child(Element::new("AppVersion").text("16.0000"))
    }
}

/// Part name of the core properties.
pub const CORE_PART: &str = "/docProps/core.xml";
/// Part name of the application properties.
pub const APP_PART: &str = "/docProps/app.xml";

/// Register `docProps/core.xml` and `docProps/app.xml` and relate them from
/// the package.
///
/// Timestamps missing from the properties are taken when the package is
/// generated.
pub fn register_doc_props<D: DocumentModel + 'static>(
    package: &mut OfficePackage<D>,
    application: &'static str,
    properties: fn(&D) -> &DocumentProperties,
    extra: fn(&D) -> Vec<Element>,
) -> Result<()> {
    package.register_part(
        CORE_PART,
        ct::OPC_CORE_PROPERTIES,
        Lifecycle::Type,
        move |doc: &D, ctx: &mut GenerationContext| {
            Ok(ctx.serialize(&properties(doc).core_element(Utc::now())))
        },
    )?;
    package.register_part(
        APP_PART,
        ct::OFC_EXTENDED_PROPERTIES,
        Lifecycle::Type,
        move |doc: &D, ctx: &mut GenerationContext| {
            Ok(ctx.serialize(&properties(doc).app_element(application, extra(doc))))
        },
    )?;
    package.relate_package(rt::CORE_PROPERTIES, CORE_PART)?;
    package.relate_package(rt::EXTENDED_PROPERTIES, APP_PART)?;
    Ok(())
}
