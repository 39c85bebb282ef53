//! Concurrent per-tile loading

use tracing::{debug, info, warn};

use super::types::{AssembleError, AssemblerConfig, TilePayload, TileRequest};
use crate::coord::{ProjectedBounds, TileCoord, TileSpace};
use crate::features::{FeatureCollection, FeatureDecoder, FeatureError, MvtDecoder};
use crate::fetch::AsyncHttpClient;
use crate::source::TileUrls;
use crate::terrain::{MartiniDecoder, TerrainDecoder, TerrainError, TerrainMesh, TerrainOptions};
use crate::texture::{Texture, TextureError};

/// Loads terrain, texture and features for map tiles.
///
/// The three parts of a tile are fetched and decoded concurrently. The
/// assembler holds no per-tile state, so a single instance can serve many
/// tiles at once from different tasks.
///
/// # Example
///
/// ```no_run
/// use tiledrape::assembler::{AssemblerConfig, TileDataAssembler, TileRequest};
/// use tiledrape::coord::TileCoord;
/// use tiledrape::fetch::AsyncReqwestClient;
/// use tiledrape::source::{TextureSources, TileSources, TileUrlTemplate};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let sources = TileSources {
///     terrain: Some(TileUrlTemplate::parse(
///         "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png",
///     )?),
///     texture: TextureSources::new(None, None),
///     features: None,
/// };
///
/// let assembler = TileDataAssembler::new(AsyncReqwestClient::new()?, AssemblerConfig::new(sources));
/// let payload = assembler
///     .assemble(&TileRequest::from_coord(TileCoord::new(328, 726, 11)?))
///     .await?;
/// println!("{} triangles", payload.terrain.map_or(0, |m| m.triangle_count()));
/// # Ok(())
/// # }
/// ```
pub struct TileDataAssembler<C, T = MartiniDecoder, F = MvtDecoder> {
    client: C,
    terrain_decoder: T,
    feature_decoder: F,
    config: AssemblerConfig,
}

impl<C: AsyncHttpClient> TileDataAssembler<C> {
    /// Creates an assembler with the default terrain and feature decoders.
    pub fn new(client: C, config: AssemblerConfig) -> Self {
        Self::with_decoders(client, MartiniDecoder::new(), MvtDecoder::new(), config)
    }
}

impl<C, T, F> TileDataAssembler<C, T, F>
where
    C: AsyncHttpClient,
    T: TerrainDecoder,
    F: FeatureDecoder,
{
    /// Creates an assembler with custom decoders.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for all three sources
    /// * `terrain_decoder` - Turns elevation rasters into meshes
    /// * `feature_decoder` - Turns vector tiles into feature collections
    /// * `config` - Sources and decoding settings
    pub fn with_decoders(
        client: C,
        terrain_decoder: T,
        feature_decoder: F,
        config: AssemblerConfig,
    ) -> Self {
        Self {
            client,
            terrain_decoder,
            feature_decoder,
            config,
        }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Source URLs that would be fetched for a tile.
    pub fn urls(&self, coord: &TileCoord) -> TileUrls {
        self.config.sources.resolve(coord)
    }

    /// Fetches and decodes every configured part of a tile.
    ///
    /// All three loads run to completion before the result is produced.
    /// A texture failure leaves `texture` empty. Terrain and feature
    /// failures abort the tile unless the matching guard is enabled.
    pub async fn assemble(&self, request: &TileRequest) -> Result<TilePayload, AssembleError> {
        let coord = request.coord;
        let urls = self.urls(&coord);
        let bounds = ProjectedBounds::from_bbox(&request.bbox, coord.z);
        let space = self.config.tile_space;

        let terrain_options = TerrainOptions {
            bounds: match space {
                TileSpace::Geographic => bounds,
                TileSpace::Local => ProjectedBounds::tile_local(),
            },
            elevation_decoder: self.config.elevation_decoder,
            mesh_max_error: self.config.mesh_max_error,
        };

        debug!(
            tile = %coord,
            terrain = urls.terrain.is_some(),
            texture = urls.texture.is_some(),
            features = urls.features.is_some(),
            "Assembling tile"
        );

        let (terrain, texture, features) = futures::join!(
            self.load_terrain(urls.terrain.as_deref(), &terrain_options),
            self.load_texture(urls.texture.as_deref()),
            self.load_features(urls.features.as_deref(), &coord, space),
        );

        let terrain = match terrain {
            Ok(mesh) => mesh,
            Err(e) if self.config.guard_terrain => {
                warn!(
                    tile = %coord,
                    url = urls.terrain.as_deref().unwrap_or_default(),
                    error = %e,
                    "Terrain failed, assembling tile without mesh"
                );
                None
            }
            Err(source) => return Err(AssembleError::Terrain { tile: coord, source }),
        };

        let texture = texture.unwrap_or_else(|e| {
            warn!(
                tile = %coord,
                url = urls.texture.as_deref().unwrap_or_default(),
                error = %e,
                "Texture failed, assembling tile without texture"
            );
            None
        });

        let features = match features {
            Ok(features) => features,
            Err(e) if self.config.guard_features => {
                warn!(
                    tile = %coord,
                    url = urls.features.as_deref().unwrap_or_default(),
                    error = %e,
                    "Features failed, assembling tile without features"
                );
                None
            }
            Err(source) => return Err(AssembleError::Features { tile: coord, source }),
        };

        info!(
            tile = %coord,
            triangles = terrain.as_ref().map_or(0, |m| m.triangle_count()),
            texture = texture.is_some(),
            features = features.as_ref().map_or(0, |f| f.len()),
            "Tile assembled"
        );

        Ok(TilePayload {
            coord,
            bounds,
            space,
            terrain,
            texture,
            features,
        })
    }

    async fn load_terrain(
        &self,
        url: Option<&str>,
        options: &TerrainOptions,
    ) -> Result<Option<TerrainMesh>, TerrainError> {
        let Some(url) = url else {
            return Ok(None);
        };

        let data = self.client.get(url).await?;
        let mesh = self.terrain_decoder.decode(&data, options)?;
        debug!(
            url = url,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "Terrain decoded"
        );
        Ok(Some(mesh))
    }

    async fn load_texture(&self, url: Option<&str>) -> Result<Option<Texture>, TextureError> {
        let Some(url) = url else {
            return Ok(None);
        };

        let data = self.client.get(url).await?;
        let texture = Texture::decode(&data)?;
        debug!(
            url = url,
            width = texture.width,
            height = texture.height,
            "Texture decoded"
        );
        Ok(Some(texture))
    }

    async fn load_features(
        &self,
        url: Option<&str>,
        coord: &TileCoord,
        space: TileSpace,
    ) -> Result<Option<FeatureCollection>, FeatureError> {
        let Some(url) = url else {
            return Ok(None);
        };

        let data = self.client.get(url).await?;
        self.feature_decoder.decode(&data, coord, space).map(Some)
    }
}
