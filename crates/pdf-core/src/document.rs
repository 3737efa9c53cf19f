//! PDF Document wrapper
//!
//! Unlike a form-filling library, this wrapper builds documents from
//! scratch: `new` creates the catalog/page-tree skeleton with the chosen
//! page geometry and pages are appended as content overflows. Content
//! operators are buffered per page and flushed once at save time.

use crate::font::{BuiltinFont, FontData, FontFamily, FontFamilyBuilder, FontWeight};
use crate::image::{calculate_scaled_dimensions, generate_image_operators, ImageXObject};
use crate::text::{generate_rule_operators, generate_text_operators, TextRenderContext};
use crate::{Align, PdfError, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// A font variant resolved for embedding at save time
enum VariantSource {
    Embedded(FontData),
    Builtin(BuiltinFont),
}

/// PDF Document wrapper providing high-level operations
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Page width in points
    page_width: f64,
    /// Page height in points
    page_height: f64,
    /// Pages tree node
    pages_id: ObjectId,
    /// Page object IDs in order
    page_ids: Vec<ObjectId>,
    /// Registered font families
    font_families: HashMap<String, FontFamily>,
    /// Current font family name
    current_family: Option<String>,
    /// Current font weight
    current_weight: FontWeight,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Page font resources (page number -> variant name -> resource name)
    page_font_resources: HashMap<usize, HashMap<String, String>>,
    /// Next font resource number
    next_font_resource: u32,
    /// Embedded images (data hash -> object ID and pixel dimensions)
    embedded_images: HashMap<u64, (ObjectId, u32, u32)>,
    /// Page image resources (page number -> resource name -> object ID)
    page_image_resources: HashMap<usize, HashMap<String, ObjectId>>,
    /// Next image resource number
    next_image_resource: u32,
    /// Buffered content operators per page
    page_content_buffer: HashMap<usize, Vec<u8>>,
    /// Buffered link annotations per page
    page_annotations: HashMap<usize, Vec<Dictionary>>,
}

impl PdfDocument {
    /// Create a new single-page document with the given page size
    ///
    /// # Arguments
    /// * `page_width` - Page width in points
    /// * `page_height` - Page height in points
    ///
    /// # Example
    /// ```ignore
    /// let mut doc = PdfDocument::new(595.28, 841.89); // A4
    /// ```
    pub fn new(page_width: f64, page_height: f64) -> Self {
        let mut inner = Document::with_version("1.5");

        let pages_id = inner.add_object(Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => 1,
            "Kids" => vec![], // Filled below
        }));

        let contents_id = inner.add_object(Object::Stream(Stream::new(
            Dictionary::new(),
            vec![],
        )));

        let page_id = inner.add_object(Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(page_width as f32),
                Object::Real(page_height as f32),
            ],
            "Resources" => Dictionary::new(),
            "Contents" => contents_id,
        }));

        let catalog_id = inner.add_object(Object::Dictionary(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }));
        inner.trailer.set("Root", catalog_id);

        let mut doc = Self {
            inner,
            page_width,
            page_height,
            pages_id,
            page_ids: vec![page_id],
            font_families: HashMap::new(),
            current_family: None,
            current_weight: FontWeight::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            page_font_resources: HashMap::new(),
            next_font_resource: 1,
            embedded_images: HashMap::new(),
            page_image_resources: HashMap::new(),
            next_image_resource: 1,
            page_content_buffer: HashMap::new(),
            page_annotations: HashMap::new(),
        };
        doc.sync_page_tree();
        doc
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Page width in points
    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    /// Page height in points
    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Append a blank page with the document's page size
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_page(&mut self) -> usize {
        let contents_id = self.inner.add_object(Object::Stream(Stream::new(
            Dictionary::new(),
            vec![],
        )));

        let page_id = self.inner.add_object(Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(self.page_width as f32),
                Object::Real(self.page_height as f32),
            ],
            "Resources" => Dictionary::new(),
            "Contents" => contents_id,
        }));

        self.page_ids.push(page_id);
        self.sync_page_tree();
        self.page_ids.len()
    }

    /// Rewrite the Pages node's Kids and Count from the tracked page list
    fn sync_page_tree(&mut self) {
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| Object::Reference(id)).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Count" => self.page_ids.len() as i64,
            "Kids" => kids,
        };
        self.inner.objects.insert(self.pages_id, pages_dict.into());
    }

    /// Register a font family with its variants
    ///
    /// # Arguments
    /// * `name` - Font family name
    /// * `builder` - FontFamilyBuilder with TTF variant data
    ///
    /// # Example
    /// ```ignore
    /// doc.register_font_family("naskh",
    ///     FontFamilyBuilder::new().regular(std::fs::read("NotoNaskhArabic-Regular.ttf")?)
    /// )?;
    /// ```
    pub fn register_font_family(&mut self, name: &str, builder: FontFamilyBuilder) -> Result<()> {
        if self.font_families.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        let family = builder.build(name)?;
        self.font_families.insert(name.to_string(), family);

        Ok(())
    }

    /// Register a builtin base-14 font family
    ///
    /// # Arguments
    /// * `name` - Font family name
    /// * `family` - Builtin family (e.g. `FontFamily::helvetica()`)
    pub fn add_builtin_family(&mut self, name: &str, family: FontFamily) -> Result<()> {
        if self.font_families.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        self.font_families.insert(name.to_string(), family);
        Ok(())
    }

    /// Set the current font family and size
    ///
    /// # Arguments
    /// * `family` - Font family name
    /// * `size` - Font size in points
    pub fn set_font(&mut self, family: &str, size: f32) -> Result<()> {
        if !self.font_families.contains_key(family) {
            return Err(PdfError::FontNotFound(family.to_string()));
        }

        self.current_family = Some(family.to_string());
        self.current_font_size = size;

        Ok(())
    }

    /// Set the font weight (keeps current family/size)
    pub fn set_font_weight(&mut self, weight: FontWeight) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_weight = weight;
        Ok(())
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Get current font's text width in points for a string
    pub fn get_text_width(&self, text: &str) -> Result<f64> {
        let family_name = self
            .current_family
            .as_ref()
            .ok_or_else(|| PdfError::FontNotFound("No font family set".to_string()))?;
        let family = self
            .font_families
            .get(family_name)
            .ok_or_else(|| PdfError::FontNotFound(family_name.clone()))?;

        let width = match family {
            FontFamily::Embedded { regular, bold } => {
                let data = match self.current_weight {
                    FontWeight::Bold => bold.as_ref().unwrap_or(regular),
                    FontWeight::Regular => regular,
                };
                data.text_width_points(text, self.current_font_size)
            }
            FontFamily::Builtin { regular, bold } => {
                let font = match self.current_weight {
                    FontWeight::Bold => bold.as_ref().unwrap_or(regular),
                    FontWeight::Regular => regular,
                };
                font.text_width_points(text, self.current_font_size)
            }
        };

        Ok(width as f64)
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `align` - Text alignment
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        // Nothing to render
        if text.is_empty() {
            return Ok(());
        }

        let family_name = self
            .current_family
            .as_ref()
            .ok_or_else(|| PdfError::FontNotFound("No font family set".to_string()))?
            .clone();
        let family = self
            .font_families
            .get_mut(&family_name)
            .ok_or_else(|| PdfError::FontNotFound(family_name.clone()))?;

        let variant_name = family.variant_name(&family_name, self.current_weight);

        // Encode and measure with the resolved variant. Embedded fonts also
        // track rendered characters for ToUnicode and /W generation.
        let (encoded, text_width) = match family {
            FontFamily::Embedded { regular, bold } => {
                let data = match self.current_weight {
                    FontWeight::Bold => bold.as_mut().unwrap_or(regular),
                    FontWeight::Regular => regular,
                };
                data.add_chars(text);
                (
                    data.encode_text_hex(text),
                    data.text_width_points(text, self.current_font_size) as f64,
                )
            }
            FontFamily::Builtin { regular, bold } => {
                let font = match self.current_weight {
                    FontWeight::Bold => bold.as_ref().unwrap_or(regular),
                    FontWeight::Regular => regular,
                };
                (
                    font.encode_literal(text),
                    font.text_width_points(text, self.current_font_size) as f64,
                )
            }
        };

        let font_resource_name = self.get_or_create_font_ref(&variant_name, page);

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let pdf_y = self.page_height - y;

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            text_width,
            color: self.current_text_color,
        };
        let operators = generate_text_operators(&encoded, x, pdf_y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Insert an image at a specific position
    ///
    /// # Arguments
    /// * `data` - Image file bytes (JPEG or PNG)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `width` - Target width in points
    /// * `height` - Target height in points
    /// * `mode` - Scaling mode
    #[allow(clippy::too_many_arguments)]
    pub fn insert_image(
        &mut self,
        data: &[u8],
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mode: crate::ImageScaleMode,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        let (image_resource_name, orig_width, orig_height) =
            self.get_or_create_image_ref(data, page)?;

        let (actual_width, actual_height) =
            calculate_scaled_dimensions(orig_width, orig_height, width, height, mode);

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let pdf_y = self.page_height - y - actual_height;

        let operators =
            generate_image_operators(&image_resource_name, x, pdf_y, actual_width, actual_height);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Draw a horizontal rule
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `x` - Start X coordinate in points
    /// * `y` - Y coordinate in points (from top)
    /// * `width` - Rule length in points
    /// * `thickness` - Stroke width in points
    /// * `color` - Stroke color
    pub fn draw_rule(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        thickness: f64,
        color: Color,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        let pdf_y = self.page_height - y;
        let operators = generate_rule_operators(x, pdf_y, width, thickness, color);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Attach a URI link annotation over a rectangular area
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `x` - Left edge in points
    /// * `y` - Top edge in points (from top)
    /// * `width` - Rectangle width in points
    /// * `height` - Rectangle height in points
    /// * `uri` - Link target
    pub fn add_link(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        uri: &str,
    ) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }

        let y_bottom = self.page_height - y - height;
        let y_top = self.page_height - y;

        let annotation = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![
                Object::Real(x as f32),
                Object::Real(y_bottom as f32),
                Object::Real((x + width) as f32),
                Object::Real(y_top as f32),
            ],
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "A" => dictionary! {
                "Type" => "Action",
                "S" => "URI",
                "URI" => Object::string_literal(uri),
            },
        };

        self.page_annotations.entry(page).or_default().push(annotation);

        Ok(())
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;
        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Flush buffered state into PDF objects
    ///
    /// Fonts embed last so embedded variants carry the complete set of
    /// rendered characters in their ToUnicode and /W entries.
    fn finalize(&mut self) -> Result<()> {
        let font_refs = self.embed_fonts()?;
        self.flush_content_buffers()?;
        self.finalize_page_dicts(&font_refs)?;
        Ok(())
    }

    /// Get or create a font reference for a specific page
    ///
    /// Returns the resource name (e.g., "F1", "F2") used in content streams.
    fn get_or_create_font_ref(&mut self, variant_name: &str, page: usize) -> String {
        let page_resources = self.page_font_resources.entry(page).or_default();

        if let Some(resource_name) = page_resources.get(variant_name) {
            return resource_name.clone();
        }

        let resource_name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;
        page_resources.insert(variant_name.to_string(), resource_name.clone());

        resource_name
    }

    /// Look up the data backing a variant name across registered families
    fn variant_source(&self, variant_name: &str) -> Result<VariantSource> {
        for (family_name, family) in &self.font_families {
            for weight in [FontWeight::Regular, FontWeight::Bold] {
                if family.variant_name(family_name, weight) != variant_name {
                    continue;
                }
                return Ok(match family {
                    FontFamily::Embedded { regular, bold } => {
                        let data = match weight {
                            FontWeight::Bold => bold.as_ref().unwrap_or(regular),
                            FontWeight::Regular => regular,
                        };
                        VariantSource::Embedded(data.clone())
                    }
                    FontFamily::Builtin { regular, bold } => {
                        let font = match weight {
                            FontWeight::Bold => bold.as_ref().unwrap_or(regular),
                            FontWeight::Regular => regular,
                        };
                        VariantSource::Builtin(font.clone())
                    }
                });
            }
        }

        Err(PdfError::FontNotFound(variant_name.to_string()))
    }

    /// Embed every font variant referenced by some page
    ///
    /// Returns a map from variant name to the font object ID.
    fn embed_fonts(&mut self) -> Result<HashMap<String, ObjectId>> {
        let mut variant_names: Vec<String> = self
            .page_font_resources
            .values()
            .flat_map(|fonts| fonts.keys().cloned())
            .collect();
        variant_names.sort();
        variant_names.dedup();

        let mut font_refs = HashMap::new();
        for name in variant_names {
            let object_id = match self.variant_source(&name)? {
                VariantSource::Embedded(data) => self.embed_font_object(&data)?,
                VariantSource::Builtin(font) => self
                    .inner
                    .add_object(Object::Dictionary(font.to_pdf_object())),
            };
            font_refs.insert(name, object_id);
        }

        Ok(font_refs)
    }

    /// Embed a single TrueType font object chain into the PDF
    fn embed_font_object(&mut self, font_data: &FontData) -> Result<ObjectId> {
        let font_objects = font_data.to_pdf_objects()?;

        let font_file_id = self.inner.add_object(font_objects.font_file_stream);

        let mut font_descriptor = font_objects.font_descriptor;
        font_descriptor.set("FontFile2", Object::Reference(font_file_id));
        let font_descriptor_id = self.inner.add_object(font_descriptor);

        let mut cid_font = font_objects.cid_font;
        cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
        let cid_font_id = self.inner.add_object(cid_font);

        let mut type0_font = font_objects.type0_font;
        type0_font.set(
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        );

        let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);
        type0_font.set("ToUnicode", Object::Reference(tounicode_id));

        Ok(self.inner.add_object(type0_font))
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Flush all buffered content into per-page stream objects
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();

        for (page, content) in buffers {
            if content.is_empty() {
                continue;
            }

            let page_id = self.page_object_id(page)?;
            let stream_id = self
                .inner
                .add_object(Stream::new(Dictionary::new(), content));

            let mut page_dict = self.page_dict(page_id)?;
            page_dict.set(b"Contents", Object::Reference(stream_id));
            self.inner.objects.insert(page_id, page_dict.into());
        }

        Ok(())
    }

    /// Write Font/XObject resources and link annotations into page dicts
    fn finalize_page_dicts(&mut self, font_refs: &HashMap<String, ObjectId>) -> Result<()> {
        let annotations: Vec<(usize, Vec<Dictionary>)> = self.page_annotations.drain().collect();
        let mut annotation_ids: HashMap<usize, Vec<ObjectId>> = HashMap::new();
        for (page, dicts) in annotations {
            let ids = dicts
                .into_iter()
                .map(|d| self.inner.add_object(Object::Dictionary(d)))
                .collect();
            annotation_ids.insert(page, ids);
        }

        for page in 1..=self.page_count() {
            let page_id = self.page_object_id(page)?;
            let mut page_dict = self.page_dict(page_id)?;
            let mut resources = Dictionary::new();

            if let Some(fonts) = self.page_font_resources.get(&page) {
                let mut font_dict = Dictionary::new();
                for (variant_name, resource_name) in fonts {
                    let font_ref = font_refs
                        .get(variant_name)
                        .ok_or_else(|| PdfError::FontNotFound(variant_name.clone()))?;
                    font_dict.set(resource_name.as_bytes(), Object::Reference(*font_ref));
                }
                resources.set(b"Font", Object::Dictionary(font_dict));
            }

            if let Some(images) = self.page_image_resources.get(&page) {
                let mut xobject_dict = Dictionary::new();
                for (resource_name, object_id) in images {
                    xobject_dict.set(resource_name.as_bytes(), Object::Reference(*object_id));
                }
                resources.set(b"XObject", Object::Dictionary(xobject_dict));
            }

            page_dict.set(b"Resources", Object::Dictionary(resources));

            if let Some(ids) = annotation_ids.remove(&page) {
                page_dict.set(
                    b"Annots",
                    Object::Array(ids.into_iter().map(Object::Reference).collect()),
                );
            }

            self.inner.objects.insert(page_id, page_dict.into());
        }

        Ok(())
    }

    /// Get the object ID for a 1-indexed page number
    fn page_object_id(&self, page: usize) -> Result<ObjectId> {
        self.page_ids
            .get(page - 1)
            .copied()
            .ok_or(PdfError::InvalidPage(page, self.page_ids.len()))
    }

    /// Clone a page dictionary for modification
    fn page_dict(&self, page_id: ObjectId) -> Result<Dictionary> {
        let page_obj = self.inner.get_object(page_id)?;
        page_obj
            .as_dict()
            .cloned()
            .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))
    }

    /// Get or create an image reference for a specific page
    ///
    /// Returns the resource name (e.g., "Im1") and original pixel
    /// dimensions. Images are deduplicated by content hash.
    fn get_or_create_image_ref(&mut self, data: &[u8], page: usize) -> Result<(String, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let data_hash = hasher.finish();

        if !self.embedded_images.contains_key(&data_hash) {
            let xobject = ImageXObject::from_bytes(data)?;
            let (width, height) = (xobject.width, xobject.height);
            let object_id = self.inner.add_object(xobject.to_pdf_stream());
            self.embedded_images
                .insert(data_hash, (object_id, width, height));
        }

        let (object_id, width, height) = self.embedded_images[&data_hash];

        let page_resources = self.page_image_resources.entry(page).or_default();
        for (name, id) in page_resources.iter() {
            if *id == object_id {
                return Ok((name.clone(), width, height));
            }
        }

        let resource_name = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        page_resources.insert(resource_name.clone(), object_id);

        Ok((resource_name, width, height))
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }
}
